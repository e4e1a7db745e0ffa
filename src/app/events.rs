use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{sync::mpsc, time::sleep};

use crate::app::pipeline::PipelineUpdate;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickRefresh,
    Input(Event),
    Pipeline {
        generation: u64,
        update: PipelineUpdate,
    },
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) {
    if refresh_secs == 0 {
        return;
    }
    tokio::spawn(async move {
        loop {
            let wait_secs = {
                let mut rng = rand::rng();
                let jitter = rng.random_range(-0.1f32..0.1f32);
                ((refresh_secs as f32) * (1.0 + jitter)).max(1.0)
            };
            sleep(Duration::from_secs_f32(wait_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}
