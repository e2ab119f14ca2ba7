//! Great-circle distance and voyage estimation along a route.

use serde::{Deserialize, Serialize};

use crate::coords::GeoCoordinate;
use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Nautical miles per kilometre.
pub const NM_PER_KM: f64 = 0.539957;

const KG_PER_TONNE: f64 = 1000.0;

/// Ship characteristics supplied per estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpecs {
    /// Service speed in knots.
    pub speed_knots: f64,
    /// Fuel burn in kilograms per nautical mile.
    #[serde(alias = "fuel_per_nautical_mile")]
    pub fuel_per_nm: f64,
}

impl Default for ShipSpecs {
    fn default() -> Self {
        Self {
            speed_knots: 15.0,
            fuel_per_nm: 0.15,
        }
    }
}

/// Built-in ship presets as `(name, speed_knots, fuel_per_nm)`.
const SHIP_PRESETS: &[(&str, f64, f64)] = &[("default", 15.0, 0.15), ("panamax", 14.0, 0.15)];

impl ShipSpecs {
    pub fn new(speed_knots: f64, fuel_per_nm: f64) -> Self {
        Self {
            speed_knots,
            fuel_per_nm,
        }
    }

    /// Look up a built-in preset by case-insensitive name.
    pub fn preset(name: &str) -> Result<Self> {
        SHIP_PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, speed, fuel)| Self::new(speed, fuel))
            .ok_or_else(|| Error::UnknownShip {
                name: name.to_string(),
            })
    }

    /// Names of the built-in presets.
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        SHIP_PRESETS.iter().map(|(name, _, _)| *name)
    }

    /// Speed and burn rate must be finite and non-negative. A zero speed is
    /// accepted and yields an infinite voyage time.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_knots.is_finite() || self.speed_knots < 0.0 {
            return Err(Error::ShipSpecsValidation {
                message: format!(
                    "speed_knots must be finite and non-negative, got {}",
                    self.speed_knots
                ),
            });
        }
        if !self.fuel_per_nm.is_finite() || self.fuel_per_nm < 0.0 {
            return Err(Error::ShipSpecsValidation {
                message: format!(
                    "fuel_per_nm must be finite and non-negative, got {}",
                    self.fuel_per_nm
                ),
            });
        }
        Ok(())
    }
}

/// Distance, time and fuel projected for a route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoyageEstimate {
    pub distance_nm: f64,
    /// `f64::INFINITY` when the ship speed is zero (serialised as `null`).
    pub time_hours: f64,
    pub fuel_tonnes: f64,
}

impl VoyageEstimate {
    /// Whether the voyage can complete, i.e. the time is finite.
    pub fn is_reachable(&self) -> bool {
        self.time_hours.is_finite()
    }
}

/// Great-circle distance between two points in nautical miles.
pub fn haversine_nm(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * NM_PER_KM
}

/// Sum of leg distances in nautical miles; zero for fewer than two points.
pub fn total_distance_nm(route: &[GeoCoordinate]) -> f64 {
    route
        .windows(2)
        .map(|leg| haversine_nm(leg[0], leg[1]))
        .sum()
}

/// Project distance, time and fuel for `route` with `specs`.
///
/// Routes with fewer than two points produce an all-zero estimate.
pub fn predict(route: &[GeoCoordinate], specs: &ShipSpecs) -> VoyageEstimate {
    if route.len() < 2 {
        return VoyageEstimate::default();
    }

    let distance_nm = total_distance_nm(route);
    let time_hours = if specs.speed_knots == 0.0 {
        f64::INFINITY
    } else {
        distance_nm / specs.speed_knots
    };
    let fuel_tonnes = distance_nm * specs.fuel_per_nm / KG_PER_TONNE;

    VoyageEstimate {
        distance_nm,
        time_hours,
        fuel_tonnes,
    }
}
