// Subcommand handlers. main.rs parses arguments and dispatches here.

pub mod estimate;
pub mod export;
pub mod grid;
pub mod route;
pub mod ships;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use shiprouter_cli::output::OutputFormat;
use shiprouter_lib::{resolve_data_dir, GridStore, Resolution, ShipSpecs};

/// Process exit codes for each failure class.
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const GRID_UNAVAILABLE: u8 = 3;
    pub const INVALID_INPUT: u8 = 4;
    pub const NO_ROUTE: u8 = 5;
    pub const SEARCH_ABORTED: u8 = 6;
}

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub data_dir: Option<PathBuf>,
    pub resolution: Resolution,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load the raster for the selected resolution.
    pub fn load_store(&self) -> Result<GridStore> {
        let data_dir = resolve_data_dir(self.data_dir.as_deref())
            .context("failed to resolve the grid data directory")?;
        let store = GridStore::load(&data_dir, self.resolution)?;
        Ok(store)
    }
}

/// Ship selection shared by `route` and `estimate`.
#[derive(Args, Debug, Clone, Default)]
pub struct ShipArgs {
    /// Built-in ship preset (see `shiprouter ships`).
    #[arg(long)]
    pub ship: Option<String>,
    /// Override the service speed in knots.
    #[arg(long)]
    pub speed: Option<f64>,
    /// Override the fuel burn in kilograms per nautical mile.
    #[arg(long = "fuel-per-nm")]
    pub fuel_per_nm: Option<f64>,
}

impl ShipArgs {
    /// Resolve the preset (or the default ship) and apply overrides.
    pub fn to_specs(&self) -> Result<ShipSpecs> {
        let mut specs = match &self.ship {
            Some(name) => ShipSpecs::preset(name)?,
            None => ShipSpecs::default(),
        };
        if let Some(speed) = self.speed {
            specs.speed_knots = speed;
        }
        if let Some(fuel) = self.fuel_per_nm {
            specs.fuel_per_nm = fuel;
        }
        specs.validate()?;
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let args = ShipArgs {
            ship: Some("panamax".to_string()),
            speed: None,
            fuel_per_nm: Some(0.2),
        };
        let specs = args.to_specs().unwrap();
        assert_eq!(specs, ShipSpecs::new(14.0, 0.2));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let args = ShipArgs {
            speed: Some(-1.0),
            ..ShipArgs::default()
        };
        assert!(args.to_specs().is_err());
    }
}
