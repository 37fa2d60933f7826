//! Exhaustive backtracking search

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::collections::square::{Coord, Square};
use crate::puzzle::{Cage, Grid, Solution, Value};

use super::constraint::{cage_satisfied, check_placement, CageMap};

/// The outcome of a backtracking solve
#[derive(Debug)]
pub struct BacktrackResult {
    /// Whether a full valid assignment was found
    pub solved: bool,
    /// The solved grid, present iff `solved`
    pub solution: Option<Solution>,
    /// Wall-clock time spent searching
    pub duration: Duration,
    /// Number of cells visited, counted once per visit (not per value trial)
    pub iterations: u64,
}

impl BacktrackResult {
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

/// Solves a puzzle by exhaustive depth-first search.
///
/// Cells are visited in row-major order, first empty cell next, and
/// values tried ascending with [`check_placement`] as the pruning
/// oracle. The caller's grid is never mutated: the search runs on an
/// owned copy of its cells, and a failed search simply yields no
/// solution.
///
/// `max_solutions` is accepted for the caller's intent but the search
/// stops at the first full valid assignment regardless, since success
/// propagates straight up the recursion. Known one-solution-only
/// behavior.
pub fn solve_backtracking(grid: &Grid, max_solutions: u32) -> BacktrackResult {
    let start = Instant::now();
    debug!(
        "backtracking over a {0}x{0} grid with {1} cages (max_solutions={2} requested; search stops at the first solution)",
        grid.width(),
        grid.cages().len(),
        max_solutions,
    );
    let mut search = Search {
        cells: grid.cells().clone(),
        cages: grid.cages(),
        cage_map: CageMap::new(grid.width(), grid.cages()),
        iterations: 0,
        solutions_found: 0,
    };
    let solved = search.next_cell();
    let duration = start.elapsed();
    if solved {
        info!(
            "solved in {:?} after {} iterations",
            duration, search.iterations
        );
    } else {
        info!(
            "no solution after {} iterations ({:?})",
            search.iterations, duration
        );
    }
    BacktrackResult {
        solved,
        solution: if solved { Some(search.cells) } else { None },
        duration,
        iterations: search.iterations,
    }
}

/// Mutable search state threaded explicitly through the recursion
struct Search<'a> {
    cells: Square<Value>,
    cages: &'a [Cage],
    cage_map: CageMap,
    iterations: u64,
    solutions_found: u32,
}

impl Search<'_> {
    fn next_cell(&mut self) -> bool {
        let coord = match self.first_empty() {
            Some(coord) => coord,
            None => return self.verify_complete(),
        };
        self.iterations += 1;
        for value in 1..=self.cells.width() as Value {
            if check_placement(&self.cells, self.cages, &self.cage_map, coord, value) {
                self.cells[coord] = value;
                if self.next_cell() {
                    return true;
                }
                self.cells[coord] = 0;
            }
        }
        false
    }

    fn first_empty(&self) -> Option<Coord> {
        for (row_index, row) in self.cells.rows().enumerate() {
            for (col, &value) in row.iter().enumerate() {
                if value == 0 {
                    return Some(Coord::new(row_index, col));
                }
            }
        }
        None
    }

    /// Full safety re-verification of every cage over the now complete
    /// grid, defending against any gap in the incremental checks.
    fn verify_complete(&mut self) -> bool {
        for cage in self.cages {
            let values: Vec<Value> = cage.cells().iter().map(|&cell| self.cells[cell]).collect();
            if !cage_satisfied(&values, cage.target(), cage.operator()) {
                return false;
            }
        }
        self.solutions_found += 1;
        debug!("found solution #{}", self.solutions_found);
        true
    }
}
