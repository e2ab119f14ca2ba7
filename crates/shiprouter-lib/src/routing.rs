use serde::Serialize;
use tracing::{debug, info};

use crate::coords::{to_grid, GeoCoordinate};
use crate::error::Result;
use crate::grid::{Grid, GridCoordinate};
use crate::output::format_route;
use crate::path::{find_path_with, SearchOptions};
use crate::water::{nearest_water, DEFAULT_SNAP_RADIUS};

/// High-level route planning request between two geographic points.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: GeoCoordinate,
    pub goal: GeoCoordinate,
    /// Rings searched when an endpoint falls on land.
    pub snap_radius: usize,
    pub search: SearchOptions,
}

impl RouteRequest {
    /// Request with the default snapping radius and search limits.
    pub fn new(start: GeoCoordinate, goal: GeoCoordinate) -> Self {
        Self {
            start,
            goal,
            snap_radius: DEFAULT_SNAP_RADIUS,
            search: SearchOptions::default(),
        }
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Water cell the route starts from after snapping.
    pub start: GridCoordinate,
    /// Water cell the route ends at after snapping.
    pub goal: GridCoordinate,
    /// Raster cells visited, both endpoints included.
    pub cells: Vec<GridCoordinate>,
    /// Geographic polyline matching `cells`.
    pub route: Vec<GeoCoordinate>,
}

impl RoutePlan {
    /// Number of moves in the route.
    pub fn hop_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Compute a sea route for `request` over `grid`.
///
/// Coordinates are validated, mapped to the raster, snapped to water and
/// searched with A*. Each step surfaces its own error kind.
pub fn plan_route(grid: &Grid, request: &RouteRequest) -> Result<RoutePlan> {
    let start_geo = request.start.validate()?;
    let goal_geo = request.goal.validate()?;
    let (rows, cols) = grid.shape();

    let start_cell = to_grid(start_geo, rows, cols);
    let goal_cell = to_grid(goal_geo, rows, cols);
    debug!(%start_geo, %goal_geo, %start_cell, %goal_cell, "mapped endpoints to grid");

    let start = nearest_water(start_cell, grid, request.snap_radius)?;
    let goal = nearest_water(goal_cell, grid, request.snap_radius)?;

    let cells = find_path_with(grid, start, goal, &request.search)?;
    let route = format_route(&cells, rows, cols);

    info!(
        %start,
        %goal,
        hops = cells.len().saturating_sub(1),
        "route planned"
    );

    Ok(RoutePlan {
        start,
        goal,
        cells,
        route,
    })
}
