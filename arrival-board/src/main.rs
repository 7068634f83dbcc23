use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use embedded_graphics::geometry::Size;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use arrival_board::error::AppError;
use arrival_board::poller::{Poller, PollerConfig};
use arrival_board::render::{ConsolePanel, Panel, PngPanel};
use arrival_board::settings::{Credentials, Settings};

#[derive(Debug, Parser)]
#[command(version, about = "CTA and Divvy arrival board")]
struct Cli {
    /// Settings file, re-read every cycle
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Where pages are shown
    #[arg(long, value_enum, default_value_t = PanelKind::Console)]
    panel: PanelKind,

    /// Output directory for `--panel png`
    #[arg(long, default_value = "pages")]
    png_dir: PathBuf,

    /// Serve CTA and Divvy data from fixture files instead of the live APIs
    #[arg(long)]
    mock_dir: Option<PathBuf>,

    /// Per-request timeout for every feed, in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PanelKind {
    Console,
    Png,
}

#[tokio::main]
async fn main() -> ExitCode {
    // before the subscriber so `.env` can set RUST_LOG
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to load .env"),
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Arrival board stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let credentials = Credentials::from_env()?;
    let display = Settings::load(&cli.settings)?.display;
    let size = Size::new(display.width, display.height);

    let mut config = PollerConfig::new(&cli.settings).with_timeout(cli.timeout_secs);
    if let Some(dir) = &cli.mock_dir {
        config = config.with_mock_dir(dir);
    }

    info!(settings = %cli.settings.display(), panel = ?cli.panel, "Starting arrival board");

    match cli.panel {
        PanelKind::Console => {
            let poller = Poller::new(config, credentials, ConsolePanel::new(size))?;
            drive(poller, cli.once).await;
        }
        PanelKind::Png => {
            let poller = Poller::new(config, credentials, PngPanel::new(&cli.png_dir, size)?)?;
            drive(poller, cli.once).await;
        }
    }
    Ok(())
}

async fn drive<P: Panel>(mut poller: Poller<P>, once: bool) {
    tokio::select! {
        _ = poller.run(once) => {}
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
}
