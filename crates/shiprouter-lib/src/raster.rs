//! Build land/water grids from GeoJSON land polygons.
//!
//! A cell is land when its geographic position (see [`to_geo`]) falls
//! inside any polygon under the even-odd rule, so polygon holes (lakes,
//! inland seas) stay water.

use serde_json::Value;
use tracing::{debug, info};

use crate::coords::{to_geo, GeoCoordinate};
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, GridCoordinate};

/// A polygon as a list of closed rings in `(lon, lat)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct LandPolygon {
    rings: Vec<Vec<(f64, f64)>>,
    bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
}

impl Bounds {
    fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

impl LandPolygon {
    /// Build a polygon from rings of `(lon, lat)` vertices. The first ring is
    /// the exterior; any further rings are holes.
    pub fn new(rings: Vec<Vec<(f64, f64)>>) -> Result<Self> {
        let exterior = rings.first().ok_or_else(|| Error::InvalidGeoJson {
            message: "polygon has no rings".to_string(),
        })?;
        if exterior.len() < 3 {
            return Err(Error::InvalidGeoJson {
                message: format!("polygon ring has {} vertices, need at least 3", exterior.len()),
            });
        }

        let bounds = exterior.iter().fold(
            Bounds {
                min_lon: f64::INFINITY,
                max_lon: f64::NEG_INFINITY,
                min_lat: f64::INFINITY,
                max_lat: f64::NEG_INFINITY,
            },
            |b, &(lon, lat)| Bounds {
                min_lon: b.min_lon.min(lon),
                max_lon: b.max_lon.max(lon),
                min_lat: b.min_lat.min(lat),
                max_lat: b.max_lat.max(lat),
            },
        );

        Ok(Self { rings, bounds })
    }

    /// Even-odd containment test across all rings.
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        let (x, y) = (point.lon, point.lat);
        if !self.bounds.contains(x, y) {
            return false;
        }
        self.rings
            .iter()
            .filter(|ring| ring_crosses(ring, x, y))
            .count()
            % 2
            == 1
    }
}

fn ring_crosses(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Extract land polygons from a GeoJSON `FeatureCollection`, `Feature`, or
/// bare geometry. Geometries other than `Polygon` and `MultiPolygon` are
/// skipped.
pub fn polygons_from_geojson(document: &Value) -> Result<Vec<LandPolygon>> {
    let mut polygons = Vec::new();
    collect_polygons(document, &mut polygons)?;
    info!(polygons = polygons.len(), "land polygons extracted");
    Ok(polygons)
}

fn collect_polygons(value: &Value, out: &mut Vec<LandPolygon>) -> Result<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidGeoJson {
            message: "object is missing a \"type\" member".to_string(),
        })?;

    match kind {
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::InvalidGeoJson {
                    message: "FeatureCollection has no features array".to_string(),
                })?;
            for feature in features {
                collect_polygons(feature, out)?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(Value::Null) | None => {}
            Some(geometry) => collect_polygons(geometry, out)?,
        },
        "GeometryCollection" => {
            for geometry in value
                .get("geometries")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
            {
                collect_polygons(geometry, out)?;
            }
        }
        "Polygon" => out.push(parse_polygon(coordinates(value)?)?),
        "MultiPolygon" => {
            let parts = coordinates(value)?
                .as_array()
                .ok_or_else(|| invalid_coordinates("MultiPolygon"))?;
            for part in parts {
                out.push(parse_polygon(part)?);
            }
        }
        other => debug!(geometry = other, "skipping non-polygon geometry"),
    }
    Ok(())
}

fn coordinates(value: &Value) -> Result<&Value> {
    value
        .get("coordinates")
        .ok_or_else(|| invalid_coordinates("geometry"))
}

fn invalid_coordinates(kind: &str) -> Error {
    Error::InvalidGeoJson {
        message: format!("{kind} has missing or malformed coordinates"),
    }
}

fn parse_polygon(value: &Value) -> Result<LandPolygon> {
    let rings = value
        .as_array()
        .ok_or_else(|| invalid_coordinates("Polygon"))?
        .iter()
        .map(|ring| {
            ring.as_array()
                .ok_or_else(|| invalid_coordinates("Polygon"))?
                .iter()
                .map(|position| {
                    let pair = position.as_array().filter(|p| p.len() >= 2);
                    match pair.map(|p| (p[0].as_f64(), p[1].as_f64())) {
                        Some((Some(lon), Some(lat))) => Ok((lon, lat)),
                        _ => Err(invalid_coordinates("Polygon")),
                    }
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    LandPolygon::new(rings)
}

/// Rasterise `polygons` into a `rows × cols` grid.
pub fn rasterize(polygons: &[LandPolygon], rows: usize, cols: usize) -> Grid {
    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let position = to_geo(GridCoordinate::new(row, col), rows, cols);
            let land = polygons.iter().any(|polygon| polygon.contains(position));
            cells.push(if land { Cell::Land } else { Cell::Water });
        }
    }
    let grid = Grid::from_cells(rows, cols, cells);
    info!(rows, cols, land_cells = grid.land_count(), "grid rasterised");
    grid
}
