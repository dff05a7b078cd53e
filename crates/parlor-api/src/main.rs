//! Parlor API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p parlor-api
//! ```
//!
//! Configuration is loaded from environment variables.

use anyhow::Context;
use parlor_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting Parlor API Server..."
    );

    parlor_api::run(config).await?;

    Ok(())
}
