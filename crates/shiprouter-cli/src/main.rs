mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shiprouter_cli::output::OutputFormat;
use shiprouter_lib::{Error as LibError, Resolution, DATA_DIR_ENV};

use commands::estimate::{handle_estimate, EstimateArgs};
use commands::export::{handle_export, ExportArgs};
use commands::grid::{handle_generate_grid, GenerateGridArgs};
use commands::route::{handle_route, RouteArgs};
use commands::ships::handle_list_ships;
use commands::{exit_codes, CommandContext, ShipArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ocean route planning over land/water rasters")]
struct Cli {
    /// Directory holding `land_water_grid_{resolution}.json` files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Raster resolution: low, medium, high, ultra or production.
    #[arg(long, global = true, default_value = "high")]
    resolution: Resolution,

    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a sea route between two coordinates.
    Route {
        #[command(flatten)]
        route: RouteArgs,
        #[command(flatten)]
        ship: ShipArgs,
    },
    /// Plan a route and write it as GPX, KML or CSV.
    Export(ExportArgs),
    /// Estimate distance, time and fuel for a stored route.
    Estimate(EstimateArgs),
    /// Rasterise GeoJSON land polygons into a grid file.
    GenerateGrid(GenerateGridArgs),
    /// List built-in ship presets.
    Ships,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", friendly_message(&err));
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext {
        data_dir: cli.data_dir,
        resolution: cli.resolution,
        format: cli.format,
    };

    match &cli.command {
        Command::Route { route, ship } => handle_route(&ctx, route, ship),
        Command::Export(args) => handle_export(&ctx, args),
        Command::Estimate(args) => handle_estimate(&ctx, args),
        Command::GenerateGrid(args) => handle_generate_grid(&ctx, args),
        Command::Ships => handle_list_ships(ctx.format),
    }
}

fn library_error(err: &anyhow::Error) -> Option<&LibError> {
    err.chain().find_map(|cause| cause.downcast_ref::<LibError>())
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match library_error(err) {
        Some(LibError::GridLoad { .. } | LibError::InvalidGrid { .. }) => {
            exit_codes::GRID_UNAVAILABLE
        }
        Some(
            LibError::InvalidCoordinate { .. }
            | LibError::NoWaterFound { .. }
            | LibError::UnknownShip { .. }
            | LibError::ShipSpecsValidation { .. }
            | LibError::InvalidGeoJson { .. },
        ) => exit_codes::INVALID_INPUT,
        Some(LibError::NoPathFound { .. }) => exit_codes::NO_ROUTE,
        Some(LibError::SearchAborted { .. }) => exit_codes::SEARCH_ABORTED,
        _ => exit_codes::ERROR,
    }
}

fn friendly_message(err: &anyhow::Error) -> String {
    let hint = match library_error(err) {
        Some(LibError::GridLoad { .. }) => Some(format!(
            "pass --data-dir or set {DATA_DIR_ENV} to a directory with the grid file, \
             or create one with `shiprouter generate-grid`"
        )),
        Some(LibError::NoWaterFound { .. }) => {
            Some("pick a point closer to the coast or raise --snap-radius".to_string())
        }
        Some(LibError::NoPathFound { .. }) => {
            Some("the endpoints lie in water bodies that are not connected".to_string())
        }
        Some(LibError::SearchAborted { .. }) => Some(
            "raise --max-expansions or use a coarser --resolution".to_string(),
        ),
        Some(LibError::UnknownShip { .. }) => {
            Some("run `shiprouter ships` to list the presets".to_string())
        }
        _ => None,
    };

    match hint {
        Some(hint) => format!("{err:#}\nHint: {hint}"),
        None => format!("{err:#}"),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
