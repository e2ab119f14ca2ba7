//! Land/water raster and the store that owns it.
//!
//! A [`Grid`] is a fixed `rows × cols` raster where row 0 is latitude +90°
//! and column 0 is longitude −180°. Grids are immutable once built; the
//! [`GridStore`] hands out shared read-only views and replaces the whole
//! grid when a reload is requested.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::grid_file_path;
use crate::error::{Error, Result};

/// Classification of a single raster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Water,
    Land,
}

impl Cell {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Water),
            1 => Some(Cell::Land),
            _ => None,
        }
    }

    fn raw(self) -> u8 {
        match self {
            Cell::Water => 0,
            Cell::Land => 1,
        }
    }
}

/// Integer raster index `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed offset, returning `None` when the result would be negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Named raster resolutions with fixed `(rows, cols)` shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Low,
    Medium,
    High,
    Ultra,
    Production,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Low,
        Resolution::Medium,
        Resolution::High,
        Resolution::Ultra,
        Resolution::Production,
    ];

    /// Raster shape as `(rows, cols)`.
    pub fn shape(self) -> (usize, usize) {
        match self {
            Resolution::Low => (20, 40),
            Resolution::Medium => (90, 180),
            Resolution::High => (180, 360),
            Resolution::Ultra => (360, 720),
            Resolution::Production => (720, 1440),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resolution::Low => "low",
            Resolution::Medium => "medium",
            Resolution::High => "high",
            Resolution::Ultra => "ultra",
            Resolution::Production => "production",
        }
    }

    /// File name of the raster backing this resolution.
    pub fn file_name(self) -> String {
        format!("land_water_grid_{}.json", self.name())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownResolution {
                name: s.to_string(),
            })
    }
}

/// Immutable land/water raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from row-major raw values (`0` water, `1` land).
    ///
    /// Rejects empty or ragged input and any value other than 0 or 1.
    pub fn from_rows<R: AsRef<[u8]>>(raw: &[R]) -> Result<Self> {
        Self::parse_rows(raw).map_err(|message| Error::InvalidGrid { message })
    }

    fn parse_rows<R: AsRef<[u8]>>(raw: &[R]) -> std::result::Result<Self, String> {
        let rows = raw.len();
        let cols = raw.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(format!("grid must not be empty, got {rows}x{cols}"));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row_index, row) in raw.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(format!(
                    "row {row_index} has {} columns, expected {cols}",
                    row.len()
                ));
            }
            for (col_index, &value) in row.iter().enumerate() {
                let cell = Cell::from_raw(value).ok_or_else(|| {
                    format!("cell ({row_index}, {col_index}) has value {value}, expected 0 or 1")
                })?;
                cells.push(cell);
            }
        }

        Ok(Self { rows, cols, cells })
    }

    /// Grid where every cell is water.
    pub fn open_water(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Water; rows * cols],
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Cell at `coord`, or `None` when the coordinate is outside the raster.
    pub fn cell(&self, coord: GridCoordinate) -> Option<Cell> {
        self.index_of(coord).map(|index| self.cells[index])
    }

    /// Out-of-range coordinates count as land.
    pub fn is_land(&self, coord: GridCoordinate) -> bool {
        !self.is_water(coord)
    }

    pub fn is_water(&self, coord: GridCoordinate) -> bool {
        self.cell(coord) == Some(Cell::Water)
    }

    /// Flattened `row * cols + col` index.
    pub fn index_of(&self, coord: GridCoordinate) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    pub fn coordinate_of(&self, index: usize) -> GridCoordinate {
        GridCoordinate::new(index / self.cols, index % self.cols)
    }

    pub fn land_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Land).count()
    }

    /// Raw row-major values, as stored in grid files.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.raw()).collect())
            .collect()
    }

    /// Read a grid from a JSON file of `rows` arrays of `cols` integers.
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |message: String| Error::GridLoad {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|err| load_error(err.to_string()))?;
        let raw: Vec<Vec<u8>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| load_error(err.to_string()))?;
        let grid = Self::parse_rows(&raw).map_err(load_error)?;

        debug!(
            path = %path.display(),
            rows = grid.rows,
            cols = grid.cols,
            "grid file parsed"
        );
        Ok(grid)
    }

    /// Write the grid to `path` in the grid file format.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &self.to_rows())?;
        info!(path = %path.display(), rows = self.rows, cols = self.cols, "grid saved");
        Ok(())
    }
}

/// Owner of the process-wide grid for one resolution.
///
/// Readers take an `Arc<Grid>` snapshot; [`GridStore::reload`] and
/// [`GridStore::swap`] replace the snapshot in one step, so in-flight
/// searches keep the grid they started with.
#[derive(Debug)]
pub struct GridStore {
    resolution: Resolution,
    path: PathBuf,
    grid: RwLock<Arc<Grid>>,
}

impl GridStore {
    /// Load the raster for `resolution` from `data_dir`.
    ///
    /// Fails with [`Error::GridLoad`] when the file is missing, unreadable,
    /// or its shape does not match the resolution preset.
    pub fn load(data_dir: &Path, resolution: Resolution) -> Result<Self> {
        let path = grid_file_path(data_dir, resolution);
        let grid = load_checked(&path, resolution)?;
        info!(
            resolution = %resolution,
            path = %path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            "grid loaded"
        );
        Ok(Self {
            resolution,
            path,
            grid: RwLock::new(Arc::new(grid)),
        })
    }

    /// Wrap an already-built grid.
    pub fn from_grid(resolution: Resolution, grid: Grid) -> Self {
        Self {
            resolution,
            path: PathBuf::new(),
            grid: RwLock::new(Arc::new(grid)),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Backing file, empty when the store was built from memory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared read-only view of the current grid.
    pub fn grid(&self) -> Arc<Grid> {
        match self.grid.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the current grid, returning the previous one.
    pub fn swap(&self, grid: Grid) -> Arc<Grid> {
        let replacement = Arc::new(grid);
        let mut guard = match self.grid.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, replacement)
    }

    /// Re-read the backing file and swap it in. The current grid is kept on failure.
    pub fn reload(&self) -> Result<Arc<Grid>> {
        let grid = load_checked(&self.path, self.resolution)?;
        info!(resolution = %self.resolution, "grid reloaded");
        Ok(self.swap(grid))
    }
}

fn load_checked(path: &Path, resolution: Resolution) -> Result<Grid> {
    let grid = Grid::load(path)?;
    let expected = resolution.shape();
    if grid.shape() != expected {
        return Err(Error::GridLoad {
            path: path.to_path_buf(),
            message: format!(
                "expected {}x{} for {} resolution, found {}x{}",
                expected.0,
                expected.1,
                resolution,
                grid.rows(),
                grid.cols()
            ),
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_counts_as_land() {
        let grid = Grid::open_water(3, 3);
        assert!(grid.is_water(GridCoordinate::new(2, 2)));
        assert!(grid.is_land(GridCoordinate::new(3, 0)));
        assert!(grid.is_land(GridCoordinate::new(0, 3)));
        assert_eq!(grid.cell(GridCoordinate::new(9, 9)), None);
    }

    #[test]
    fn rejects_ragged_and_non_binary_rows() {
        let ragged = Grid::from_rows(&[vec![0u8, 0], vec![0]]).expect_err("ragged");
        assert!(format!("{ragged}").contains("row 1 has 1 columns"));

        let non_binary = Grid::from_rows(&[vec![0u8, 2]]).expect_err("non-binary");
        assert!(format!("{non_binary}").contains("expected 0 or 1"));

        let empty: [Vec<u8>; 0] = [];
        assert!(Grid::from_rows(&empty).is_err());
    }

    #[test]
    fn flattened_index_round_trips() {
        let grid = Grid::open_water(4, 7);
        let coord = GridCoordinate::new(3, 5);
        let index = grid.index_of(coord).expect("inside grid");
        assert_eq!(index, 3 * 7 + 5);
        assert_eq!(grid.coordinate_of(index), coord);
    }

    #[test]
    fn resolution_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Resolution>().unwrap(), Resolution::High);
        assert_eq!(Resolution::High.shape(), (180, 360));
        assert_eq!(Resolution::Production.shape(), (720, 1440));
        assert_eq!(Resolution::High.file_name(), "land_water_grid_high.json");
        assert!("galactic".parse::<Resolution>().is_err());
    }

    #[test]
    fn swap_replaces_snapshot_without_touching_readers() {
        let store = GridStore::from_grid(Resolution::Low, Grid::open_water(2, 2));
        let before = store.grid();
        let land = Grid::from_rows(&[[1u8, 1], [1, 1]]).unwrap();
        store.swap(land.clone());

        assert_eq!(before.land_count(), 0);
        assert_eq!(*store.grid(), land);
    }
}
