use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind};
use crossterm::execute;

use sysdash::action::Action;
use sysdash::app::{Dashboard, DashboardOptions};
use sysdash::bridge::{JsonFileBackend, MetricsBackend, SysinfoBackend};
use sysdash::config::{self, Config};
use sysdash::event::{Event, EventHandler};
use sysdash::logging;
use sysdash::system::kill::signal_from_config;
use sysdash::ui;

#[derive(Parser)]
#[command(
    name = "sysdash",
    version,
    about = "Terminal dashboard for CPU, memory and processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Polling interval in milliseconds
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Read snapshots from a JSON file instead of sampling this machine
    #[arg(long)]
    source: Option<PathBuf>,

    /// Signal sent by kill actions: kill or term
    #[arg(long)]
    signal: Option<String>,

    /// Color theme: dark or light
    #[arg(long)]
    theme: Option<String>,

    /// Log file path (default: <data dir>/sysdash/sysdash.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_error) = load_config_for_cli(&cli);

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .or_else(logging::default_log_path);
    if let Some(path) = &log_path
        && let Err(e) = logging::init_file_logging(path, &config.logging.level)
    {
        eprintln!("sysdash: logging disabled: {e}");
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config not loaded, using defaults");
    }

    let signal = signal_from_config(&config.general.kill_signal);
    match config.general.source.clone() {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading snapshots from file");
            start(JsonFileBackend::new(path, signal), &config).await
        }
        None => {
            tracing::info!("sampling local system");
            start(SysinfoBackend::new(signal), &config).await
        }
    }
}

async fn start<B: MetricsBackend>(bridge: B, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, Arc::new(bridge), config).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();
    tracing::info!("dashboard closed");

    result
}

async fn run<B: MetricsBackend>(
    terminal: &mut ratatui::DefaultTerminal,
    bridge: Arc<B>,
    config: &Config,
) -> Result<()> {
    let mut events = EventHandler::new();
    let mut app = Dashboard::new(
        bridge,
        events.sender(),
        DashboardOptions::from_config(config),
    );
    app.initialize();

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Mouse(mouse) => {
                let action = app.map_mouse(mouse);
                let changed = action != Action::None;
                app.dispatch(action);
                changed
            }
            Event::Refresh(cause) => {
                app.refresh(cause);
                true
            }
            Event::Snapshot(snapshot) => {
                app.on_snapshot(snapshot);
                true
            }
            Event::Resize => true,
        };
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> (Config, Option<config::ConfigError>) {
    let (mut config, error) = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(ms) = cli.poll_interval {
        config.general.poll_interval_ms = ms;
    }
    if let Some(ref path) = cli.source {
        config.general.source = Some(path.clone());
    }
    if let Some(ref signal) = cli.signal {
        config.general.kill_signal = signal.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    (config, error)
}
