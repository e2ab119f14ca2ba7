//! Route command handler for planning a sea route between two points.

use anyhow::Result;
use clap::Args;
use tracing::info;

use shiprouter_cli::args::parse_geo;
use shiprouter_cli::output::render_route;
use shiprouter_lib::{
    plan_route, GeoCoordinate, RoutePlan, RouteRequest, RouteSummary, SearchOptions,
    DEFAULT_SNAP_RADIUS,
};

use super::{CommandContext, ShipArgs};

/// Endpoints and search limits shared by `route` and `export`.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Departure as `LAT,LON` in decimal degrees.
    #[arg(long, value_parser = parse_geo, allow_hyphen_values = true)]
    pub from: GeoCoordinate,
    /// Destination as `LAT,LON` in decimal degrees.
    #[arg(long, value_parser = parse_geo, allow_hyphen_values = true)]
    pub to: GeoCoordinate,
    /// Abort the search after this many node expansions.
    #[arg(long)]
    pub max_expansions: Option<usize>,
    /// Rings searched around an endpoint that falls on land.
    #[arg(long, default_value_t = DEFAULT_SNAP_RADIUS)]
    pub snap_radius: usize,
}

impl RouteArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(self.from, self.to).with_search(SearchOptions {
            max_expansions: self.max_expansions,
        });
        request.snap_radius = self.snap_radius;
        request
    }

    /// Load the grid and plan the route.
    pub fn plan(&self, ctx: &CommandContext) -> Result<RoutePlan> {
        let store = ctx.load_store()?;
        let grid = store.grid();
        let plan = plan_route(&grid, &self.to_request())?;
        info!(
            resolution = %ctx.resolution,
            hops = plan.hop_count(),
            "route planned"
        );
        Ok(plan)
    }
}

/// Handle the `route` subcommand.
pub fn handle_route(ctx: &CommandContext, route: &RouteArgs, ship: &ShipArgs) -> Result<()> {
    let specs = ship.to_specs()?;
    let plan = route.plan(ctx)?;
    let summary = RouteSummary::from_plan(&plan, Some(&specs));
    render_route(&summary, ctx.format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_limits() {
        let args = RouteArgs {
            from: GeoCoordinate::new(0.0, -150.0),
            to: GeoCoordinate::new(0.0, 150.0),
            max_expansions: Some(42),
            snap_radius: 3,
        };
        let request = args.to_request();
        assert_eq!(request.search.max_expansions, Some(42));
        assert_eq!(request.snap_radius, 3);
        assert_eq!(request.goal, GeoCoordinate::new(0.0, 150.0));
    }
}
