//! BBB Monitor - Entry Point
//!
//! Polls the BigBlueButton administrative API for active meetings and
//! serves the result as an authenticated HTML dashboard.

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    bbbmon_daemon::logging::init_logging()?;

    info!("Starting BBB monitor v{}", env!("CARGO_PKG_VERSION"));

    // Configuration errors are fatal: the port must never be bound with
    // an incomplete setup.
    let config = bbbmon_daemon::AppConfig::from_env()?;
    info!(
        api_url = %config.api_url,
        port = config.server_port,
        refresh_interval_secs = config.refresh_interval_secs,
        "Configuration loaded"
    );

    let app = bbbmon_daemon::Application::new(config);
    app.run().await?;

    Ok(())
}
