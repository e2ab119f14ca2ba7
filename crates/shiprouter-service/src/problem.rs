//! RFC 9457 Problem Details for HTTP APIs.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use shiprouter_lib::Error as LibError;

pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";
pub const PROBLEM_NO_WATER: &str = "/problems/no-water";
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";
pub const PROBLEM_SEARCH_ABORTED: &str = "/problems/search-aborted";
pub const PROBLEM_GRID_UNAVAILABLE: &str = "/problems/grid-unavailable";
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response body.
///
/// ```
/// use axum::http::StatusCode;
/// use shiprouter_service::{ProblemDetails, PROBLEM_NO_WATER};
///
/// let problem = ProblemDetails::new(PROBLEM_NO_WATER, "No Water Nearby", StatusCode::BAD_REQUEST)
///     .with_detail("no water found within 10 cells of (4, 13)")
///     .with_request_id("0190b6c2-0000-7000-8000-000000000000");
/// assert_eq!(problem.status, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request identifier of this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for malformed or out-of-range input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 500 when no raster is loaded for the configured resolution.
    pub fn grid_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_GRID_UNAVAILABLE,
            "Grid Not Loaded",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Map a library error onto its HTTP problem.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    let (type_uri, title, status) = match error {
        LibError::GridLoad { .. } | LibError::InvalidGrid { .. } => {
            return ProblemDetails::grid_unavailable(error.to_string(), request_id);
        }
        LibError::InvalidCoordinate { .. }
        | LibError::ShipSpecsValidation { .. }
        | LibError::UnknownShip { .. } => {
            return ProblemDetails::bad_request(error.to_string(), request_id);
        }
        LibError::NoWaterFound { .. } => {
            (PROBLEM_NO_WATER, "No Water Nearby", StatusCode::BAD_REQUEST)
        }
        LibError::NoPathFound { .. } => (
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        ),
        LibError::SearchAborted { .. } => (
            PROBLEM_SEARCH_ABORTED,
            "Search Aborted",
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        _ => return ProblemDetails::internal_error(error.to_string(), request_id),
    };

    ProblemDetails::new(type_uri, title, status)
        .with_detail(error.to_string())
        .with_request_id(request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiprouter_lib::GridCoordinate;

    #[test]
    fn bad_request_serialises_rfc_fields() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn library_errors_map_to_statuses() {
        let cell = GridCoordinate::new(4, 13);
        let cases = [
            (
                LibError::NoWaterFound {
                    origin: cell,
                    radius: 10,
                },
                400,
            ),
            (
                LibError::InvalidCoordinate {
                    lat: 91.0,
                    lon: 0.0,
                },
                400,
            ),
            (
                LibError::NoPathFound {
                    start: cell,
                    goal: cell,
                },
                404,
            ),
            (
                LibError::SearchAborted {
                    start: cell,
                    goal: cell,
                    expansions: 5,
                },
                503,
            ),
            (
                LibError::InvalidGrid {
                    message: "empty".to_string(),
                },
                500,
            ),
        ];

        for (error, status) in cases {
            let problem = from_lib_error(&error, "req-map");
            assert_eq!(problem.status, status, "{error}");
            assert_eq!(problem.detail.as_deref(), Some(error.to_string().as_str()));
        }
    }
}
