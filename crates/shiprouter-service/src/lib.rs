//! HTTP routing service for ShipRouter.
//!
//! Handlers are thin wrappers over `shiprouter-lib`: they parse and validate
//! JSON, call the library, and translate errors into RFC 9457 problems.
//!
//! # Endpoints
//!
//! - `POST /api/route`: `{"start": [lat, lon], "end": [lat, lon]}` to `{"path": [...]}`
//! - `POST /api/estimate`: voyage estimate for a polyline
//! - `POST /api/export/{format}`: GPX, KML or CSV document for a polyline
//! - `GET /health/live`, `GET /health/ready`

#![deny(warnings)]

pub mod handlers;
mod health;
pub mod logging;
mod problem;
pub mod request;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_GRID_UNAVAILABLE, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_NO_WATER, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SEARCH_ABORTED,
};
pub use state::AppState;

/// Build the service router over `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/route", post(handlers::route_handler))
        .route("/api/estimate", post(handlers::estimate_handler))
        .route("/api/export/{format}", post(handlers::export_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
