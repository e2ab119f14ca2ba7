//! Export command handler: plan a route and write it as GPX, KML or CSV.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use shiprouter_lib::export::{render, EXPORT_FAILED_PREFIX};
use shiprouter_lib::{export_to_csv, ExportFormat};

use super::route::RouteArgs;
use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub route: RouteArgs,
    /// Document format: gpx, kml or csv.
    #[arg(long = "as", value_name = "FORMAT")]
    pub export_as: ExportFormat,
    /// Write the document to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Handle the `export` subcommand.
pub fn handle_export(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
    let plan = args.route.plan(ctx)?;

    match (&args.output, args.export_as) {
        (Some(path), ExportFormat::Csv) => {
            let status = export_to_csv(&plan.route, path);
            if status.starts_with(EXPORT_FAILED_PREFIX) {
                bail!(status);
            }
            println!("{status}");
        }
        (Some(path), format) => {
            let document = render(&plan.route, format)?;
            fs::write(path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {format} route to {}", path.display());
        }
        (None, format) => print!("{}", render(&plan.route, format)?),
    }
    Ok(())
}
