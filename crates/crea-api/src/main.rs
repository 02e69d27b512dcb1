//! CREA API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p crea-api
//! ```
//!
//! Configuration is read from environment variables, optionally seeded from
//! a `.env` file.

use crea_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("crea-api: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting CREA API server"
    );

    crea_api::run(config).await?;

    Ok(())
}
