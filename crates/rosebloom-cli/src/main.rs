//! Rosebloom terminal entry point.

use std::error::Error;
use std::sync::Arc;

use rosebloom_cli::config::{AppConfig, LogFormat};
use rosebloom_cli::driver::{Driver, run};
use rosebloom_core::clock::SystemClock;
use rosebloom_stage::application::controller::StageController;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Initialize tracing subscriber. Logs go to stderr; stdout carries frames.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .pretty()
            .init(),
    }

    tracing::info!(emit_events = config.emit_events, "Starting Rosebloom");

    let controller = StageController::new(Arc::new(SystemClock))?;
    let driver = Driver::new(controller, config.emit_events);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run(driver, stdin, &mut stdout).await?;

    Ok(())
}
