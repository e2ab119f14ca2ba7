//! ShipRouter CLI library.
//!
//! Argument parsing helpers, terminal styling and output formatting shared by
//! the `shiprouter` binary's subcommands.

pub mod args;
pub mod output;
pub mod terminal;
