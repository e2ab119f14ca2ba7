//! Request types, validation and request identifiers.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use shiprouter_lib::{GeoCoordinate, ShipSpecs};

use crate::ProblemDetails;

/// Header carrying a caller-supplied request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Validation hook run before a request reaches the library.
pub trait Validate {
    /// `request_id` populates the `instance` field of the returned problem.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// `POST /api/route` body: `{"start": [lat, lon], "end": [lat, lon]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
    /// Optional cap on A* expansions for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_expansions: Option<usize>,
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        validate_points(&[self.start, self.end], request_id)?;
        if self.max_expansions == Some(0) {
            return Err(Box::new(ProblemDetails::bad_request(
                "max_expansions must be greater than zero",
                request_id,
            )));
        }
        Ok(())
    }
}

/// `POST /api/estimate` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub path: Vec<GeoCoordinate>,
    /// Explicit ship specs; takes precedence over `preset`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship: Option<ShipSpecs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl EstimateRequest {
    /// Ship specs for this request: explicit, preset, or the default ship.
    pub fn specs(&self) -> shiprouter_lib::Result<ShipSpecs> {
        let specs = match (&self.ship, &self.preset) {
            (Some(specs), _) => *specs,
            (None, Some(name)) => ShipSpecs::preset(name)?,
            (None, None) => ShipSpecs::default(),
        };
        specs.validate()?;
        Ok(specs)
    }
}

impl Validate for EstimateRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.path.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'path' field must contain at least one point",
                request_id,
            )));
        }
        validate_points(&self.path, request_id)
    }
}

/// `POST /api/export/{format}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub path: Vec<GeoCoordinate>,
}

impl Validate for ExportRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        validate_points(&self.path, request_id)
    }
}

fn validate_points(points: &[GeoCoordinate], request_id: &str) -> Result<(), Box<ProblemDetails>> {
    for point in points {
        point
            .validate()
            .map_err(|err| Box::new(ProblemDetails::bad_request(err.to_string(), request_id)))?;
    }
    Ok(())
}

/// Use the caller's `X-Request-ID` when present, otherwise a fresh UUID v7.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string())
}
