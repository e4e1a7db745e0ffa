pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod server;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::{
    io::{self, Stdout},
    net::{Ipv4Addr, SocketAddr},
};

use anyhow::Result;
use app::{
    events::{AppEvent, spawn_input_task, start_refresh_task},
    pipeline::Services,
    state::{AppMode, AppState},
};
use cli::{Cli, Command, DashboardArgs};
use config::{DashboardConfig, ProxyTarget, ServerConfig};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::air_quality::AirQualityClient;
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::info;
use ui::theme::Theme;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => {
            logging::init_stderr();
            server::run(ServerConfig::from_args(&args)).await
        }
        Command::Dashboard(args) => run_dashboard(&args).await,
    }
}

async fn run_dashboard(args: &DashboardArgs) -> Result<()> {
    let config = DashboardConfig::from_args(args)?;
    if args.one_shot {
        logging::init_stderr();
    } else if let Some(path) = &args.log_file {
        logging::init_file(path)?;
    }

    let (proxy_url, proxy_task) = start_proxy(&config.proxy).await?;
    let services = Services::new(&config, &proxy_url);

    let result = if args.one_shot {
        run_one_shot(&config, services).await
    } else {
        let mut terminal = setup_terminal()?;
        let result = run_interactive(&mut terminal, &config, services).await;
        restore_terminal(&mut terminal)?;
        result
    };

    if let Some(task) = proxy_task {
        task.abort();
    }
    result
}

/// Resolves the proxy base URL, starting an in-process proxy when needed.
pub async fn start_proxy(target: &ProxyTarget) -> Result<(String, Option<JoinHandle<()>>)> {
    match target {
        ProxyTarget::Remote(url) => Ok((url.clone(), None)),
        ProxyTarget::Embedded { provider_url } => {
            let state =
                server::ServerState::new(AirQualityClient::with_base_url(provider_url.clone()));
            let (addr, task) =
                server::spawn(state, SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
            info!(%addr, "started in-process air quality proxy");
            Ok((format!("http://{addr}"), Some(task)))
        }
    }
}

async fn run_one_shot(config: &DashboardConfig, services: Services) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
    let mut app = AppState::new(config, services);

    app.handle_event(AppEvent::Bootstrap, &tx);
    app.drive_until_settled(&tx, &mut rx).await?;

    print!("{}", ui::report::render_report(&app));
    if app.mode == AppMode::Error
        && let Some(err) = app.last_error
    {
        anyhow::bail!(err);
    }
    Ok(())
}

async fn run_interactive(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &DashboardConfig,
    services: Services,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(config, services);
    let theme = Theme::detect();

    start_refresh_task(tx.clone(), config.refresh_interval_secs);
    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx);
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx);
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app, theme))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
