//! Ships command handler for listing built-in presets.

use anyhow::Result;

use shiprouter_cli::output::{render_json, OutputFormat};
use shiprouter_lib::ShipSpecs;

/// Handle the `ships` subcommand.
pub fn handle_list_ships(format: OutputFormat) -> Result<()> {
    let mut ships = Vec::new();
    for name in ShipSpecs::preset_names() {
        ships.push((name, ShipSpecs::preset(name)?));
    }

    if format == OutputFormat::Json {
        let listing: serde_json::Map<String, serde_json::Value> = ships
            .iter()
            .map(|(name, specs)| Ok(((*name).to_string(), serde_json::to_value(specs)?)))
            .collect::<serde_json::Result<_>>()?;
        render_json(&listing)?;
        return Ok(());
    }

    println!("{:<12} {:>10} {:>12}", "ship", "speed (kn)", "fuel (kg/nm)");
    for (name, specs) in &ships {
        println!(
            "{:<12} {:>10.1} {:>12.3}",
            name, specs.speed_knots, specs.fuel_per_nm
        );
    }
    Ok(())
}
