use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Grid, GridCoordinate};

/// Default number of rings searched by [`nearest_water`].
pub const DEFAULT_SNAP_RADIUS: usize = 10;

/// Snap `start` to the closest water cell found by expanding square rings.
///
/// Water cells are returned unchanged. Each ring of radius `i` is scanned
/// top row left to right, bottom row left to right, then the left column
/// and the right column top to bottom (corners excluded). The first water
/// cell in that order wins, so the order decides between equidistant
/// candidates. Cells outside the raster are skipped.
pub fn nearest_water(
    start: GridCoordinate,
    grid: &Grid,
    max_radius: usize,
) -> Result<GridCoordinate> {
    if grid.is_water(start) {
        return Ok(start);
    }

    for radius in 1..=max_radius {
        if let Some(found) = ring(start, radius).find(|cell| grid.is_water(*cell)) {
            debug!(%start, %found, radius, "snapped land cell to water");
            return Ok(found);
        }
    }

    Err(Error::NoWaterFound {
        origin: start,
        radius: max_radius,
    })
}

/// Cells on the ring of `radius` around `center`, in scan order, skipping
/// positions that would fall below index zero.
fn ring(center: GridCoordinate, radius: usize) -> impl Iterator<Item = GridCoordinate> {
    let r = radius as isize;
    let top = (-r..=r).map(move |dc| (-r, dc));
    let bottom = (-r..=r).map(move |dc| (r, dc));
    let left = (-r + 1..r).map(move |dr| (dr, -r));
    let right = (-r + 1..r).map(move |dr| (dr, r));

    top.chain(bottom)
        .chain(left)
        .chain(right)
        .filter_map(move |(dr, dc)| center.offset(dr, dc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land_block(rows: usize, cols: usize) -> Vec<Vec<u8>> {
        vec![vec![1u8; cols]; rows]
    }

    #[test]
    fn water_start_is_returned_unchanged() {
        let grid = Grid::open_water(3, 3);
        let start = GridCoordinate::new(1, 1);
        assert_eq!(nearest_water(start, &grid, 10).unwrap(), start);
    }

    #[test]
    fn top_row_is_scanned_before_bottom_row() {
        let mut raw = land_block(5, 5);
        raw[3][3] = 0; // bottom-right of ring 1 around (2, 2)
        raw[1][3] = 0; // top-right of ring 1
        let grid = Grid::from_rows(&raw).unwrap();

        let found = nearest_water(GridCoordinate::new(2, 2), &grid, 2).unwrap();
        assert_eq!(found, GridCoordinate::new(1, 3));
    }

    #[test]
    fn bottom_row_is_scanned_before_side_columns() {
        let mut raw = land_block(5, 5);
        raw[2][1] = 0; // left column of ring 1
        raw[3][3] = 0; // bottom row of ring 1
        let grid = Grid::from_rows(&raw).unwrap();

        let found = nearest_water(GridCoordinate::new(2, 2), &grid, 2).unwrap();
        assert_eq!(found, GridCoordinate::new(3, 3));
    }

    #[test]
    fn left_column_is_scanned_before_right_column() {
        let mut raw = land_block(5, 5);
        raw[2][3] = 0;
        raw[2][1] = 0;
        let grid = Grid::from_rows(&raw).unwrap();

        let found = nearest_water(GridCoordinate::new(2, 2), &grid, 1).unwrap();
        assert_eq!(found, GridCoordinate::new(2, 1));
    }

    #[test]
    fn closer_ring_wins_over_scan_order() {
        let mut raw = land_block(7, 7);
        raw[0][0] = 0; // ring 3, first in scan order
        raw[5][3] = 0; // ring 2
        let grid = Grid::from_rows(&raw).unwrap();

        let found = nearest_water(GridCoordinate::new(3, 3), &grid, 3).unwrap();
        assert_eq!(found, GridCoordinate::new(5, 3));
    }

    #[test]
    fn skips_cells_outside_the_raster() {
        let mut raw = land_block(3, 3);
        raw[2][2] = 0;
        let grid = Grid::from_rows(&raw).unwrap();

        let found = nearest_water(GridCoordinate::new(0, 0), &grid, 2).unwrap();
        assert_eq!(found, GridCoordinate::new(2, 2));
    }

    #[test]
    fn fails_when_radius_is_exhausted() {
        let mut raw = land_block(9, 9);
        raw[8][8] = 0;
        let grid = Grid::from_rows(&raw).unwrap();

        let err = nearest_water(GridCoordinate::new(0, 0), &grid, 3).expect_err("too far");
        assert!(matches!(err, Error::NoWaterFound { radius: 3, .. }));
    }
}
