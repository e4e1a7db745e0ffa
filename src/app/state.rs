use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    app::{
        events::AppEvent,
        pipeline::{self, Origin, PipelineUpdate, Services},
    },
    config::{DashboardConfig, StartLocation},
    domain::{
        air_quality::{
            AirQualityReading, PollutantRow, SeverityTier, TrendPoint, derive_hourly_series,
            derive_pollutant_rows,
        },
        location::Location,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub status_message: String,
    pub last_error: Option<String>,
    pub location: Option<Location>,
    pub reading: Option<AirQualityReading>,
    pub insight: Option<String>,
    pub search_open: bool,
    pub search_query: String,
    pub generation: u64,
    pub pipeline_in_flight: bool,
    pub trend_hours: usize,
    start: StartLocation,
    services: Services,
    pipeline_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(config: &DashboardConfig, services: Services) -> Self {
        Self {
            mode: AppMode::Loading,
            running: true,
            status_message: "Initializing...".to_string(),
            last_error: None,
            location: None,
            reading: None,
            insight: None,
            search_open: false,
            search_query: String::new(),
            generation: 0,
            pipeline_in_flight: false,
            trend_hours: config.trend_hours,
            start: config.start.clone(),
            services,
            pipeline_task: None,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) {
        match event {
            AppEvent::Bootstrap => {
                let origin = Origin::from(&self.start);
                self.start_pipeline(origin, tx);
            }
            AppEvent::TickRefresh => self.refresh(tx),
            AppEvent::Input(input) => self.handle_input(input, tx),
            AppEvent::Pipeline { generation, update } => {
                self.handle_pipeline(generation, update);
            }
        }
    }

    /// Feeds events from `rx` until the current pipeline has finished.
    pub async fn drive_until_settled(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        while self.pipeline_in_flight {
            let Some(event) = rx.recv().await else {
                anyhow::bail!("event channel closed before the dashboard settled");
            };
            self.handle_event(event, tx);
        }
        Ok(())
    }

    /// Starts a new request chain, superseding any chain still running.
    pub fn start_pipeline(&mut self, origin: Origin, tx: &mpsc::Sender<AppEvent>) {
        if let Some(task) = self.pipeline_task.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.pipeline_in_flight = true;
        self.last_error = None;
        self.insight = None;
        if self.reading.is_none() {
            self.mode = AppMode::Loading;
        }
        self.status_message = "Loading...".to_string();

        let services = self.services.clone();
        let generation = self.generation;
        let tx2 = tx.clone();
        self.pipeline_task = Some(tokio::spawn(async move {
            pipeline::run(services, origin, generation, tx2).await;
        }));
    }

    pub fn refresh(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.pipeline_in_flight {
            return;
        }
        let origin = match &self.location {
            Some(location) => Origin::Known(location.clone()),
            None => Origin::from(&self.start),
        };
        self.start_pipeline(origin, tx);
    }

    pub fn search(&mut self, query: &str, tx: &mpsc::Sender<AppEvent>) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.start_pipeline(Origin::Search(query.to_string()), tx);
    }

    /// Applies a pipeline update. Returns `false` when it came from a
    /// superseded chain and was dropped.
    pub fn handle_pipeline(&mut self, generation: u64, update: PipelineUpdate) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "dropping stale pipeline update"
            );
            return false;
        }

        match update {
            PipelineUpdate::Progress(message) => self.status_message = message,
            PipelineUpdate::ReadingsFetched { location, reading } => {
                self.location = Some(location);
                self.reading = Some(reading);
                self.mode = AppMode::Ready;
                self.last_error = None;
            }
            PipelineUpdate::InsightGenerated(text) => {
                self.insight = Some(text);
                self.pipeline_in_flight = false;
                self.pipeline_task = None;
                self.status_message = self.updated_message();
            }
            PipelineUpdate::Failed(message) => {
                self.pipeline_in_flight = false;
                self.pipeline_task = None;
                self.mode = AppMode::Error;
                self.status_message = message.clone();
                self.last_error = Some(message);
            }
        }
        true
    }

    fn updated_message(&self) -> String {
        match &self.reading {
            Some(reading) => format!(
                "Updated {}",
                reading
                    .fetched_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
            ),
            None => "Ready".to_string(),
        }
    }

    fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.mode = AppMode::Quit;
            return;
        }
        if self.search_open {
            self.handle_search_key(key, tx);
        } else {
            self.handle_main_key(key.code, tx);
        }
    }

    fn handle_main_key(&mut self, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.mode = AppMode::Quit,
            KeyCode::Char('/' | 's') => {
                self.search_open = true;
                self.search_query.clear();
            }
            KeyCode::Char('r') => self.refresh(tx),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        match key.code {
            KeyCode::Esc => {
                self.search_open = false;
                self.search_query.clear();
            }
            KeyCode::Enter => {
                let query = std::mem::take(&mut self.search_query);
                self.search_open = false;
                self.search(&query, tx);
            }
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(c) => self.search_query.push(c),
            _ => {}
        }
    }

    pub fn severity(&self) -> Option<SeverityTier> {
        self.reading
            .as_ref()
            .and_then(|reading| reading.current.severity())
            .and_then(Result::ok)
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        self.reading
            .as_ref()
            .map(|reading| derive_hourly_series(reading, self.trend_hours))
            .unwrap_or_default()
    }

    pub fn pollutant_rows(&self) -> Option<[PollutantRow; 6]> {
        self.reading.as_ref().map(derive_pollutant_rows)
    }
}
