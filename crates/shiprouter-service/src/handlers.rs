//! Route, estimate and export handlers.
//!
//! Handlers stay thin: parse, validate, call `shiprouter-lib`, shape the
//! response. Searches run on the blocking pool.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use shiprouter_lib::export::render;
use shiprouter_lib::{
    plan_route, predict, total_distance_nm, ExportFormat, GeoCoordinate, RouteRequest as LibRequest,
    SearchOptions, VoyageEstimate,
};

use crate::problem::from_lib_error;
use crate::request::{
    extract_or_generate_request_id, EstimateRequest, ExportRequest, RouteRequest, Validate,
};
use crate::{AppState, ProblemDetails};

/// Route response: `{"path": [[lat, lon], ...]}` plus summary figures.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub path: Vec<GeoCoordinate>,
    pub hops: usize,
    pub distance_nm: f64,
}

/// Either a JSON payload or an RFC 9457 problem.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(T),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

fn parse_body<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &str,
) -> Result<T, ProblemDetails> {
    let Json(request) = payload
        .map_err(|rejection| ProblemDetails::bad_request(rejection.body_text(), request_id))?;
    request.validate(request_id).map_err(|problem| *problem)?;
    Ok(request)
}

/// `POST /api/route`
pub async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResponse<RouteResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    let request = match parse_body(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => return ApiResponse::Error(problem),
    };

    info!(
        request_id = %request_id,
        start = %request.start,
        end = %request.end,
        "handling route request"
    );

    let grid = match state.grid() {
        Ok(grid) => grid,
        Err(reason) => {
            error!(request_id = %request_id, reason, "route requested without a grid");
            return ApiResponse::Error(ProblemDetails::grid_unavailable(reason, &request_id));
        }
    };

    let lib_request = LibRequest::new(request.start, request.end).with_search(SearchOptions {
        max_expansions: request.max_expansions,
    });
    let planned = tokio::task::spawn_blocking(move || plan_route(&grid, &lib_request)).await;

    let plan = match planned {
        Ok(Ok(plan)) => plan,
        Ok(Err(err)) => {
            warn!(request_id = %request_id, error = %err, "route planning failed");
            return ApiResponse::Error(from_lib_error(&err, &request_id));
        }
        Err(join_error) => {
            error!(request_id = %request_id, error = %join_error, "route task failed");
            return ApiResponse::Error(ProblemDetails::internal_error(
                "route computation did not complete",
                &request_id,
            ));
        }
    };

    let response = RouteResponse {
        hops: plan.hop_count(),
        distance_nm: total_distance_nm(&plan.route),
        path: plan.route,
    };
    info!(
        request_id = %request_id,
        hops = response.hops,
        distance_nm = response.distance_nm,
        "route computed successfully"
    );
    ApiResponse::Success(response)
}

/// `POST /api/estimate`
pub async fn estimate_handler(
    headers: HeaderMap,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> ApiResponse<VoyageEstimate> {
    let request_id = extract_or_generate_request_id(&headers);
    let request = match parse_body(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => return ApiResponse::Error(problem),
    };

    let specs = match request.specs() {
        Ok(specs) => specs,
        Err(err) => return ApiResponse::Error(from_lib_error(&err, &request_id)),
    };
    let estimate = predict(&request.path, &specs);
    info!(
        request_id = %request_id,
        points = request.path.len(),
        distance_nm = estimate.distance_nm,
        "voyage estimated"
    );
    ApiResponse::Success(estimate)
}

/// `POST /api/export/{format}` where format is `gpx`, `kml` or `csv`.
pub async fn export_handler(
    Path(format): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> axum::response::Response {
    let request_id = extract_or_generate_request_id(&headers);
    let format: ExportFormat = match format.parse() {
        Ok(format) => format,
        Err(message) => return ProblemDetails::bad_request(message, &request_id).into_response(),
    };
    let request = match parse_body(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => return problem.into_response(),
    };

    match render(&request.path, format) {
        Ok(document) => {
            info!(
                request_id = %request_id,
                format = %format,
                points = request.path.len(),
                "route exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"route.{}\"", format.extension()),
                    ),
                ],
                document,
            )
                .into_response()
        }
        Err(err) => from_lib_error(&err, &request_id).into_response(),
    }
}
