//! Yatube API server entry point
//!
//! ```bash
//! cargo run -p yatube-api
//! ```
//!
//! Configuration comes from environment variables (and `.env`).

use tracing::{error, info};
use yatube_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(err) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {err}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting Yatube API server"
    );

    if let Err(e) = yatube_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
