use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Grid, GridCoordinate};

/// Moves considered from each cell: cardinal first, then diagonal.
const NEIGHBOUR_OFFSETS: [(isize, isize, f64); 8] = [
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (1, 1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (-1, -1, SQRT_2),
];

/// Limits applied to a single search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of cells expanded before giving up with
    /// [`Error::SearchAborted`]. `None` uses the grid's cell count, which
    /// can only be reached once every reachable cell has been closed.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn with_max_expansions(limit: usize) -> Self {
        Self {
            max_expansions: Some(limit),
        }
    }

    fn limit_for(&self, grid: &Grid) -> usize {
        self.max_expansions.unwrap_or_else(|| grid.len())
    }
}

/// Find a water-only path between two cells with the default options.
pub fn find_path(
    grid: &Grid,
    start: GridCoordinate,
    goal: GridCoordinate,
) -> Result<Vec<GridCoordinate>> {
    find_path_with(grid, start, goal, &SearchOptions::default())
}

/// Run A* over the 8-connected raster.
///
/// Cardinal moves cost 1 and diagonal moves cost √2. The heuristic is the
/// Manhattan distance, which overestimates under diagonal movement, so the
/// returned path is not guaranteed to be the cheapest. Entries with equal
/// `f` pop in insertion order.
///
/// Both endpoints must be in-bounds water cells, otherwise
/// [`Error::NoPathFound`] is returned without searching.
pub fn find_path_with(
    grid: &Grid,
    start: GridCoordinate,
    goal: GridCoordinate,
    options: &SearchOptions,
) -> Result<Vec<GridCoordinate>> {
    if start == goal {
        return Ok(vec![start]);
    }

    let no_path = || Error::NoPathFound { start, goal };
    let (Some(start_index), Some(goal_index)) = (grid.index_of(start), grid.index_of(goal))
    else {
        return Err(no_path());
    };
    if grid.is_land(start) || grid.is_land(goal) {
        return Err(no_path());
    }

    let limit = options.limit_for(grid);
    let mut g_score: HashMap<usize, f64> = HashMap::new();
    let mut parents: HashMap<usize, usize> = HashMap::new();
    let mut closed: HashSet<usize> = HashSet::new();
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;
    let mut expansions = 0usize;

    g_score.insert(start_index, 0.0);
    open.push(OpenEntry::new(start_index, manhattan(start, goal), sequence));

    while let Some(entry) = open.pop() {
        // Superseded entries for already-finalised cells.
        if closed.contains(&entry.index) {
            continue;
        }

        if entry.index == goal_index {
            let path = reconstruct_path(grid, &parents, start_index, goal_index);
            debug!(
                %start,
                %goal,
                expansions,
                length = path.len(),
                "path found"
            );
            return Ok(path);
        }

        if expansions >= limit {
            debug!(%start, %goal, expansions, limit, "search aborted");
            return Err(Error::SearchAborted {
                start,
                goal,
                expansions,
            });
        }
        expansions += 1;
        closed.insert(entry.index);

        let current = grid.coordinate_of(entry.index);
        let current_g = g_score.get(&entry.index).copied().unwrap_or(f64::INFINITY);

        for &(d_row, d_col, cost) in &NEIGHBOUR_OFFSETS {
            let Some(next) = current.offset(d_row, d_col) else {
                continue;
            };
            let Some(next_index) = grid.index_of(next) else {
                continue;
            };
            if grid.is_land(next) || closed.contains(&next_index) {
                continue;
            }

            let tentative_g = current_g + cost;
            if tentative_g < g_score.get(&next_index).copied().unwrap_or(f64::INFINITY) {
                g_score.insert(next_index, tentative_g);
                parents.insert(next_index, entry.index);
                sequence += 1;
                open.push(OpenEntry::new(
                    next_index,
                    tentative_g + manhattan(next, goal),
                    sequence,
                ));
            }
        }
    }

    debug!(%start, %goal, expansions, "open set exhausted");
    Err(no_path())
}

fn manhattan(a: GridCoordinate, b: GridCoordinate) -> f64 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as f64
}

fn reconstruct_path(
    grid: &Grid,
    parents: &HashMap<usize, usize>,
    start: usize,
    goal: usize,
) -> Vec<GridCoordinate> {
    let mut path = vec![grid.coordinate_of(goal)];
    let mut current = goal;
    while current != start {
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        path.push(grid.coordinate_of(parent));
        current = parent;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    index: usize,
    estimate: FloatOrd,
    sequence: u64,
}

impl OpenEntry {
    fn new(index: usize, estimate: f64, sequence: u64) -> Self {
        Self {
            index,
            estimate: FloatOrd(estimate),
            sequence,
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the lowest estimate, then the oldest entry.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
