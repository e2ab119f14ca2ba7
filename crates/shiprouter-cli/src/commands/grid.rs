//! Grid generation from GeoJSON land polygons.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use shiprouter_cli::terminal::format_with_separators;
use shiprouter_lib::{grid_file_path, polygons_from_geojson, rasterize, resolve_data_dir};

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct GenerateGridArgs {
    /// GeoJSON file with Polygon or MultiPolygon land features.
    #[arg(long)]
    pub geojson: PathBuf,
    /// Target file. Defaults to the grid file for `--resolution` in the data directory.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Handle the `generate-grid` subcommand.
pub fn handle_generate_grid(ctx: &CommandContext, args: &GenerateGridArgs) -> Result<()> {
    let text = fs::read_to_string(&args.geojson)
        .with_context(|| format!("failed to read {}", args.geojson.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.geojson.display()))?;
    let polygons = polygons_from_geojson(&document)?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => grid_file_path(&resolve_data_dir(ctx.data_dir.as_deref())?, ctx.resolution),
    };

    let (rows, cols) = ctx.resolution.shape();
    let grid = rasterize(&polygons, rows, cols);
    grid.save(&output)?;

    info!(
        polygons = polygons.len(),
        land_cells = grid.land_count(),
        path = %output.display(),
        "grid generated"
    );
    println!(
        "Wrote {}x{} {} grid ({} land cells) to {}",
        rows,
        cols,
        ctx.resolution,
        format_with_separators(grid.land_count() as u64),
        output.display()
    );
    Ok(())
}
