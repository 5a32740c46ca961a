//! Terminal client entry point.
mod app;
mod config;
mod input;
mod presentation;

use std::path::Path;

use anyhow::Result;
use app::CliApp;
use config::CliConfig;
use presentation::terminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config.log_dir)?;

    let tui = terminal::init()?;
    let _terminal = terminal::TerminalGuard;

    CliApp::new(config, tui)?.run().await
}

/// Logs go to a file only; stderr belongs to the TUI.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "skirmish.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/skirmish.log", log_dir.display());
    Ok(guard)
}
