use std::path::PathBuf;

use thiserror::Error;

use crate::grid::GridCoordinate;

/// Convenient result alias for the ShipRouter library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raster file for a resolution could not be read or was malformed.
    #[error("failed to load grid from {path}: {message}")]
    GridLoad { path: PathBuf, message: String },

    /// Raised when in-memory raster data is empty, ragged, or non-binary.
    #[error("invalid grid: {message}")]
    InvalidGrid { message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for grid data")]
    ProjectDirsUnavailable,

    /// Raised when a resolution name does not match any known preset.
    #[error("unknown grid resolution: {name}")]
    UnknownResolution { name: String },

    /// Raised when a latitude or longitude lies outside its valid domain.
    #[error("invalid coordinate: latitude {lat}, longitude {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Raised when no water cell lies within the snapping radius.
    #[error("no water found within {radius} cells of {origin}")]
    NoWaterFound { origin: GridCoordinate, radius: usize },

    /// Raised when the search cannot connect the two cells.
    #[error("no route found between {start} and {goal}")]
    NoPathFound {
        start: GridCoordinate,
        goal: GridCoordinate,
    },

    /// Raised when the search exceeded its expansion budget.
    #[error("search aborted after {expansions} expansions between {start} and {goal}")]
    SearchAborted {
        start: GridCoordinate,
        goal: GridCoordinate,
        expansions: usize,
    },

    /// Raised when ship specifications fail validation.
    #[error("invalid ship specs: {message}")]
    ShipSpecsValidation { message: String },

    /// Raised when a ship preset name is not in the catalogue.
    #[error("unknown ship preset: {name}")]
    UnknownShip { name: String },

    /// Raised when a GeoJSON document cannot be rasterised.
    #[error("invalid GeoJSON: {message}")]
    InvalidGeoJson { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
