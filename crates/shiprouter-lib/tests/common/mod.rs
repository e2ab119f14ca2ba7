//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use shiprouter_lib::{Grid, GridStore, Resolution};

/// Path to fixtures directory used by tests (grid rasters, GeoJSON).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The 5x5 harbour grid:
///
/// ```text
/// 0 0 0 0 0
/// 0 1 1 1 0
/// 0 1 0 0 0
/// 0 0 0 1 0
/// 0 1 1 1 0
/// ```
#[allow(dead_code)]
pub fn harbour_grid() -> Grid {
    Grid::load(&fixtures_dir().join("harbour_5x5.json")).expect("harbour fixture loads")
}

/// 5x5 grid split by an unbroken land wall along row 2 and column 2.
#[allow(dead_code)]
pub fn walled_grid() -> Grid {
    Grid::load(&fixtures_dir().join("walled_5x5.json")).expect("walled fixture loads")
}

/// Store backed by the synthetic 20x40 `low` world fixture.
#[allow(dead_code)]
pub fn low_store() -> GridStore {
    GridStore::load(&fixtures_dir(), Resolution::Low).expect("low fixture loads")
}
