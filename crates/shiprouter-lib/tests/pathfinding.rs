mod common;

use shiprouter_lib::{find_path, Error, Grid, GridCoordinate};

use common::{harbour_grid, walled_grid};

fn cell(row: usize, col: usize) -> GridCoordinate {
    GridCoordinate::new(row, col)
}

fn assert_all_water(grid: &Grid, path: &[GridCoordinate]) {
    for step in path {
        assert!(grid.is_water(*step), "path crosses land at {step}");
    }
}

fn assert_connected(path: &[GridCoordinate]) {
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1 && a != b,
            "{a} and {b} are not neighbours"
        );
    }
}

#[test]
fn straight_path_along_open_row() {
    let grid = harbour_grid();
    let path = find_path(&grid, cell(0, 0), cell(0, 4)).expect("route exists");

    assert_eq!(
        path,
        vec![cell(0, 0), cell(0, 1), cell(0, 2), cell(0, 3), cell(0, 4)]
    );
}

#[test]
fn path_around_obstacle_never_touches_land() {
    let grid = harbour_grid();
    let path = find_path(&grid, cell(2, 4), cell(4, 0)).expect("route exists");

    assert_eq!(path.first(), Some(&cell(2, 4)));
    assert_eq!(path.last(), Some(&cell(4, 0)));
    assert_all_water(&grid, &path);
    assert_connected(&path);
    assert_eq!(path, vec![cell(2, 4), cell(2, 3), cell(3, 2), cell(3, 1), cell(4, 0)]);
}

#[test]
fn longer_detour_through_the_east_channel() {
    let grid = harbour_grid();
    let path = find_path(&grid, cell(4, 4), cell(4, 0)).expect("route exists");

    assert_all_water(&grid, &path);
    assert_connected(&path);
    assert_eq!(path.len(), 6);
}

#[test]
fn wall_between_regions_means_no_path() {
    let grid = walled_grid();
    let err = find_path(&grid, cell(0, 0), cell(4, 4)).expect_err("wall blocks route");
    assert!(matches!(err, Error::NoPathFound { .. }));
    assert!(format!("{err}").contains("no route found"));
}

#[test]
fn land_endpoints_are_rejected() {
    let grid = harbour_grid();

    let start_on_land = find_path(&grid, cell(1, 1), cell(0, 4)).expect_err("start is land");
    assert!(matches!(start_on_land, Error::NoPathFound { .. }));

    let end_on_land = find_path(&grid, cell(0, 0), cell(4, 1)).expect_err("end is land");
    assert!(matches!(end_on_land, Error::NoPathFound { .. }));
}

#[test]
fn out_of_bounds_goal_is_rejected() {
    let grid = harbour_grid();
    let err = find_path(&grid, cell(0, 0), cell(10, 10)).expect_err("goal outside grid");
    assert!(matches!(err, Error::NoPathFound { .. }));
}

#[test]
fn identical_start_and_end_is_single_cell() {
    let grid = harbour_grid();
    let path = find_path(&grid, cell(0, 0), cell(0, 0)).expect("trivial route");
    assert_eq!(path, vec![cell(0, 0)]);
}

#[test]
fn search_is_deterministic() {
    let grid = harbour_grid();
    let first = find_path(&grid, cell(0, 0), cell(2, 2)).unwrap();
    for _ in 0..5 {
        assert_eq!(find_path(&grid, cell(0, 0), cell(2, 2)).unwrap(), first);
    }
    assert_eq!(
        first,
        vec![cell(0, 0), cell(1, 0), cell(2, 0), cell(3, 1), cell(2, 2)]
    );
}
