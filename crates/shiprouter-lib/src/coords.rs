//! Mapping between geographic coordinates and raster indices.
//!
//! The forward mapping rounds to the nearest index and clamps into the
//! raster; the inverse mapping is the exact inverse formula without
//! clamping. The two are deliberately not exact inverses of each other: a
//! round trip may move a point by up to one cell width.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridCoordinate;

/// Geographic coordinate in degrees.
///
/// Serialises as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject latitudes outside `[-90, 90]`, longitudes outside `[-180, 180]`
    /// and non-finite values.
    pub fn validate(self) -> Result<Self> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

impl From<[f64; 2]> for GeoCoordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoCoordinate> for [f64; 2] {
    fn from(value: GeoCoordinate) -> Self {
        [value.lat, value.lon]
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lon)
    }
}

/// Snap a geographic coordinate to the nearest raster index.
pub fn to_grid(geo: GeoCoordinate, rows: usize, cols: usize) -> GridCoordinate {
    let last_row = rows.saturating_sub(1);
    let last_col = cols.saturating_sub(1);

    let row = ((-geo.lat + 90.0) / 180.0 * last_row as f64).round();
    let col = ((geo.lon + 180.0) / 360.0 * last_col as f64).round();

    GridCoordinate::new(clamp_index(row, last_row), clamp_index(col, last_col))
}

/// Geographic position of a raster index, rounded to 6 decimal places.
pub fn to_geo(cell: GridCoordinate, rows: usize, cols: usize) -> GeoCoordinate {
    // Single-row or single-column rasters map their only index to the first line.
    let row_span = rows.saturating_sub(1).max(1) as f64;
    let col_span = cols.saturating_sub(1).max(1) as f64;

    let lat = -((cell.row as f64 / row_span) * 180.0 - 90.0);
    let lon = (cell.col as f64 / col_span) * 360.0 - 180.0;

    GeoCoordinate::new(round6(lat), round6(lon))
}

fn clamp_index(value: f64, last: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        (value as usize).min(last)
    }
}

fn round6(value: f64) -> f64 {
    // Adding zero folds -0.0 into 0.0 so exports never print "-0.0".
    (value * 1_000_000.0).round() / 1_000_000.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: usize = 180;
    const COLS: usize = 360;

    fn snap(lat: f64, lon: f64) -> (usize, usize) {
        let cell = to_grid(GeoCoordinate::new(lat, lon), ROWS, COLS);
        (cell.row, cell.col)
    }

    #[test]
    fn snaps_known_cities() {
        assert_eq!(snap(35.68, 139.76), (54, 319));
        assert_eq!(snap(-22.90, -43.17), (112, 136));
        assert_eq!(snap(51.5, 0.0), (38, 180));
    }

    #[test]
    fn snaps_poles_to_first_and_last_rows() {
        assert_eq!(snap(90.0, 0.0), (0, 180));
        assert_eq!(snap(-90.0, 180.0), (179, 359));
        assert_eq!(snap(0.0, -180.0), (90, 0));
    }

    #[test]
    fn clamps_values_outside_domain() {
        assert_eq!(snap(120.0, -400.0), (0, 0));
        assert_eq!(snap(-120.0, 400.0), (179, 359));
    }

    #[test]
    fn inverse_uses_exact_formula() {
        let geo = to_geo(GridCoordinate::new(54, 319), ROWS, COLS);
        assert!((geo.lat - 35.698324).abs() < 1e-6, "lat was {}", geo.lat);
        assert!((geo.lon - 139.888579).abs() < 1e-6, "lon was {}", geo.lon);

        let corner = to_geo(GridCoordinate::new(179, 359), ROWS, COLS);
        assert_eq!(corner, GeoCoordinate::new(-90.0, 180.0));
    }

    #[test]
    fn round_trip_stays_within_one_cell() {
        let cell_lat = 180.0 / (ROWS - 1) as f64;
        let cell_lon = 360.0 / (COLS - 1) as f64;
        for &(lat, lon) in &[
            (40.71, -74.00),
            (-33.87, 151.21),
            (89.99, 179.99),
            (-89.5, -179.5),
            (0.0, 0.0),
        ] {
            let back = to_geo(to_grid(GeoCoordinate::new(lat, lon), ROWS, COLS), ROWS, COLS);
            assert!((back.lat - lat).abs() <= cell_lat, "lat {lat} -> {}", back.lat);
            assert!((back.lon - lon).abs() <= cell_lon, "lon {lon} -> {}", back.lon);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(GeoCoordinate::new(90.0, 180.0).validate().is_ok());
        assert!(GeoCoordinate::new(90.5, 0.0).validate().is_err());
        assert!(GeoCoordinate::new(0.0, -180.1).validate().is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn serialises_as_lat_lon_pair() {
        let json = serde_json::to_string(&GeoCoordinate::new(9.5, -79.5)).unwrap();
        assert_eq!(json, "[9.5,-79.5]");
        let parsed: GeoCoordinate = serde_json::from_str("[36.0,-6.0]").unwrap();
        assert_eq!(parsed, GeoCoordinate::new(36.0, -6.0));
    }
}
