use std::fmt::Write;

use serde::Serialize;

use crate::coords::{to_geo, GeoCoordinate};
use crate::fuel::{predict, total_distance_nm, ShipSpecs, VoyageEstimate};
use crate::grid::GridCoordinate;
use crate::routing::RoutePlan;

/// Convert a raster path into a geographic polyline.
///
/// Each cell is mapped with [`to_geo`]; an empty path yields an empty route.
pub fn format_route(path: &[GridCoordinate], rows: usize, cols: usize) -> Vec<GeoCoordinate> {
    path.iter().map(|cell| to_geo(*cell, rows, cols)).collect()
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Waypoint within a rendered route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub cell: GridCoordinate,
    pub position: GeoCoordinate,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub hops: usize,
    pub start: GeoCoordinate,
    pub goal: GeoCoordinate,
    pub distance_nm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship: Option<ShipSpecs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<VoyageEstimate>,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Build a summary from a [`RoutePlan`], attaching a voyage estimate when
    /// ship specs are provided.
    pub fn from_plan(plan: &RoutePlan, ship: Option<&ShipSpecs>) -> Self {
        let steps = plan
            .cells
            .iter()
            .zip(&plan.route)
            .enumerate()
            .map(|(index, (cell, position))| RouteStep {
                index,
                cell: *cell,
                position: *position,
            })
            .collect::<Vec<_>>();

        let start = plan.route.first().copied().unwrap_or(GeoCoordinate::new(0.0, 0.0));
        let goal = plan.route.last().copied().unwrap_or(start);

        Self {
            hops: plan.hop_count(),
            start,
            goal,
            distance_nm: total_distance_nm(&plan.route),
            ship: ship.copied(),
            estimate: ship.map(|specs| predict(&plan.route, specs)),
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.1} nm)",
            self.start, self.goal, self.hops, self.distance_nm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>4}: {} {}",
                step.index, step.position, step.cell
            );
        }
        if let Some(estimate) = &self.estimate {
            let _ = writeln!(buffer, "{}", describe_estimate(estimate));
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, `{:.1} nm`)",
            self.start, self.goal, self.hops, self.distance_nm
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "* {:>3}. `{}`", step.index, step.position);
        }
        if let Some(estimate) = &self.estimate {
            let _ = writeln!(buffer, "\n_{}_", describe_estimate(estimate));
        }
        buffer
    }
}

/// One-line description of a voyage estimate.
pub fn describe_estimate(estimate: &VoyageEstimate) -> String {
    let time = if estimate.is_reachable() {
        format!(
            "{:.2} hours (~{:.1} days)",
            estimate.time_hours,
            estimate.time_hours / 24.0
        )
    } else {
        "unbounded (ship speed is zero)".to_string()
    };
    format!(
        "Distance: {:.2} nm; time: {}; fuel: {:.2} tonnes",
        estimate.distance_nm, time, estimate.fuel_tonnes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_formats_to_empty_route() {
        assert!(format_route(&[], 180, 360).is_empty());
    }

    #[test]
    fn formats_each_cell_in_order() {
        let route = format_route(
            &[GridCoordinate::new(0, 0), GridCoordinate::new(179, 359)],
            180,
            360,
        );
        assert_eq!(
            route,
            vec![GeoCoordinate::new(90.0, -180.0), GeoCoordinate::new(-90.0, 180.0)]
        );
    }

    #[test]
    fn describe_estimate_handles_zero_speed() {
        let estimate = VoyageEstimate {
            distance_nm: 10.0,
            time_hours: f64::INFINITY,
            fuel_tonnes: 0.1,
        };
        assert!(describe_estimate(&estimate).contains("unbounded"));
    }
}
