//! ShipRouter library entry points.
//!
//! This crate loads land/water rasters, maps geographic coordinates onto
//! them, snaps endpoints to water, runs A* sea route searches, and turns the
//! result into estimates and export formats. Higher-level consumers (CLI,
//! HTTP service) should only depend on the functions exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod coords;
pub mod dataset;
pub mod error;
pub mod export;
pub mod fuel;
pub mod grid;
pub mod output;
pub mod path;
pub mod raster;
pub mod routing;
pub mod water;

pub use coords::{to_geo, to_grid, GeoCoordinate};
pub use dataset::{default_data_dir, grid_file_path, resolve_data_dir, DATA_DIR_ENV};
pub use error::{Error, Result};
pub use export::{export_to_csv, to_csv, to_gpx, to_kml, ExportFormat};
pub use fuel::{haversine_nm, predict, total_distance_nm, ShipSpecs, VoyageEstimate};
pub use grid::{Cell, Grid, GridCoordinate, GridStore, Resolution};
pub use output::{format_route, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{find_path, find_path_with, SearchOptions};
pub use raster::{polygons_from_geojson, rasterize, LandPolygon};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use water::{nearest_water, DEFAULT_SNAP_RADIUS};
