//! Output formatting for route and voyage results.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use shiprouter_lib::output::describe_estimate;
use shiprouter_lib::{RouteRenderMode, RouteSummary, VoyageEstimate};

use crate::terminal::ColorPalette;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly listing with highlighted endpoints.
    #[default]
    Text,
    /// Markdown-flavoured summary.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Print a route summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", format_text(summary, &ColorPalette::detect()));
            Ok(())
        }
        OutputFormat::Rich => {
            print!("{}", summary.render(RouteRenderMode::RichText));
            Ok(())
        }
        OutputFormat::Json => render_json(summary),
    }
}

/// Text listing: one line per waypoint, tagged `STRT`, `WAYP` or `GOAL`.
pub fn format_text(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Route from {}{}{} to {}{}{} ({} hops, {:.1} nm):",
        p.white_bold,
        summary.start,
        p.reset,
        p.white_bold,
        summary.goal,
        p.reset,
        summary.hops,
        summary.distance_nm
    );

    let last = summary.steps.len().saturating_sub(1);
    for step in &summary.steps {
        let (tag, color) = if step.index == 0 {
            ("STRT", p.tag_start)
        } else if step.index == last {
            ("GOAL", p.tag_goal)
        } else {
            ("WAYP", p.tag_waypoint)
        };
        let _ = writeln!(
            out,
            " {color} {tag} {reset} {} {gray}cell {}{reset}",
            step.position,
            step.cell,
            reset = p.reset,
            gray = p.gray,
        );
    }

    if let Some(estimate) = &summary.estimate {
        let _ = writeln!(out, "\n{}{}{}", p.cyan, describe_estimate(estimate), p.reset);
    }
    out
}

/// Print a voyage estimate in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_estimate(estimate: &VoyageEstimate, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", describe_estimate(estimate));
            Ok(())
        }
        OutputFormat::Rich => {
            println!("**Voyage estimate**\n\n_{}_", describe_estimate(estimate));
            Ok(())
        }
        OutputFormat::Json => render_json(estimate),
    }
}

/// Write any serialisable value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
