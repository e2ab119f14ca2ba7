//! ShipRouter HTTP microservice.
//!
//! # Configuration
//!
//! - `SHIPROUTER_DATA_DIR`: directory holding the grid files (falls back to
//!   the platform data directory)
//! - `SHIPROUTER_RESOLUTION`: grid resolution to load (default: high)
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `RUST_LOG`: log level (default: info)
//! - `LOG_FORMAT`: json (default) or text

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn};

use shiprouter_lib::Resolution;
use shiprouter_service::{app, init_logging, AppState, LoggingConfig};

const RESOLUTION_ENV: &str = "SHIPROUTER_RESOLUTION";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("shiprouter");
    init_logging(&logging_config);

    let resolution = match env::var(RESOLUTION_ENV) {
        Ok(value) => value.parse::<Resolution>().unwrap_or_else(|err| {
            warn!(error = %err, "falling back to high resolution");
            Resolution::High
        }),
        Err(_) => Resolution::High,
    };
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(resolution = %resolution, port, "starting route service");

    // A missing grid is reported by /health/ready rather than aborting startup.
    let state = AppState::load(None, resolution);
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
