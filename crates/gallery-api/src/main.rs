//! Gallery API server entry point
//!
//! Configuration comes from the environment, with `.env` loaded first.

use gallery_common::{init_logging, init_logging_with, AppConfig, LogSettings};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // APP_ENV may be the broken part, so fall back to plain output
            let _ = init_logging_with(LogSettings::default());
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(config.app.env) {
        eprintln!("Warning: {e}");
    }

    info!(
        service = %config.app.name,
        env = ?config.app.env,
        addr = %config.api.address(),
        "Starting gallery API"
    );

    if let Err(e) = gallery_api::run(config).await {
        error!(error = %e, "Server stopped with an error");
        std::process::exit(1);
    }
}
