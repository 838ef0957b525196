//! Weather Forecast Server - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FORECAST_CONFIG").ok());

    let config = ServerConfig::load(path.as_deref()).context("Failed to load configuration")?;
    init_logging(config.level()?).context("Failed to set tracing subscriber")?;

    info!("=== Weather Forecast Server v{} ===", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &path {
        info!("Loaded configuration from {}", path);
    }

    run_server(config).await.context("Server error")?;

    Ok(())
}
