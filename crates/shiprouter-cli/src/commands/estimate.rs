//! Estimate command handler for stored route polylines.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Deserialize;

use shiprouter_cli::output::render_estimate;
use shiprouter_lib::{predict, GeoCoordinate};

use super::{CommandContext, ShipArgs};

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// JSON file holding `[[lat, lon], ...]` or a route response `{"path": [...]}`.
    #[arg(long)]
    pub route: PathBuf,
    #[command(flatten)]
    pub ship: ShipArgs,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteFile {
    Points(Vec<GeoCoordinate>),
    Response {
        #[serde(alias = "route")]
        path: Vec<GeoCoordinate>,
    },
}

/// Read a stored polyline in either accepted layout.
pub fn load_route_file(path: &Path) -> Result<Vec<GeoCoordinate>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let parsed: RouteFile = serde_json::from_str(&text).with_context(|| {
        format!(
            "{} is neither a list of [lat, lon] pairs nor an object with a \"path\" field",
            path.display()
        )
    })?;
    let points = match parsed {
        RouteFile::Points(points) | RouteFile::Response { path: points } => points,
    };
    for point in &points {
        point.validate()?;
    }
    Ok(points)
}

/// Handle the `estimate` subcommand.
pub fn handle_estimate(ctx: &CommandContext, args: &EstimateArgs) -> Result<()> {
    let specs = args.ship.to_specs()?;
    let points = load_route_file(&args.route)?;
    if points.is_empty() {
        bail!("route file {} contains no points", args.route.display());
    }
    let estimate = predict(&points, &specs);
    render_estimate(&estimate, ctx.format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn accepts_bare_list_and_response_object() {
        let temp = TempDir::new().expect("create temp dir");
        let bare = temp.path().join("bare.json");
        let wrapped = temp.path().join("wrapped.json");
        fs::write(&bare, "[[9.5, -79.5], [36.0, -6.0]]").unwrap();
        fs::write(&wrapped, r#"{"path": [[9.5, -79.5], [36.0, -6.0]]}"#).unwrap();

        let expected = vec![GeoCoordinate::new(9.5, -79.5), GeoCoordinate::new(36.0, -6.0)];
        assert_eq!(load_route_file(&bare).unwrap(), expected);
        assert_eq!(load_route_file(&wrapped).unwrap(), expected);
    }

    #[test]
    fn rejects_out_of_range_points() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("bad.json");
        fs::write(&path, "[[95.0, 0.0]]").unwrap();
        assert!(load_route_file(&path).is_err());
    }
}
