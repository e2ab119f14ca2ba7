//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body returned by `/health/live` and `/health/ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,
    pub service: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// `[rows, cols]` of the loaded grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_shape: Option<[usize; 2]>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            resolution: None,
            grid_shape: None,
        }
    }

    pub fn ready(service: &str, version: &str, resolution: &str, shape: (usize, usize)) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            resolution: Some(resolution.to_string()),
            grid_shape: Some([shape.0, shape.1]),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            resolution: None,
            grid_shape: None,
        }
    }
}

/// `GET /health/live`: the process is up.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: a grid is loaded and routes can be served.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match state.grid() {
        Ok(grid) => {
            let status =
                HealthStatus::ready(service, version, state.resolution().name(), grid.shape());
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(reason) => {
            let status = HealthStatus::not_ready(service, version, reason);
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
