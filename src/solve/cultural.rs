//! Cultural algorithm: a genetic search guided by a learned belief
//! distribution over cell values

use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::collections::square::{Coord, Square};
use crate::puzzle::{Cage, Grid, Solution, Value};

use super::constraint::cage_satisfied;

/// How much belief mass shifts toward the elite set each generation
const BELIEF_ALPHA: f64 = 0.3;

/// Per-cell probability of resampling a value from the belief
/// distribution during mutation
const BELIEF_RESAMPLE_RATE: f64 = 0.02;

const TOURNAMENT_SIZE: usize = 3;

/// Tuning knobs for [`CulturalSolver`].
///
/// The constructor clamps degenerate settings: population size at
/// least 20, elite fraction within [0.05, 0.4], at least 10
/// generations, mutation rate within [0, 1].
#[derive(Clone, Copy, Debug)]
pub struct CulturalParams {
    pub population_size: usize,
    pub elite_fraction: f64,
    pub max_generations: u32,
    /// Per-row probability of swapping two positions during mutation
    pub mutation_rate: f64,
}

impl Default for CulturalParams {
    fn default() -> Self {
        Self {
            population_size: 200,
            elite_fraction: 0.1,
            max_generations: 1000,
            mutation_rate: 0.15,
        }
    }
}

/// The outcome of a cultural solve
#[derive(Debug)]
pub struct CulturalResult {
    /// Whether a zero-violation candidate was found
    pub solved: bool,
    /// The best candidate found across all generations. `None` only if
    /// no candidate was ever scored, which cannot happen with the
    /// clamped parameters.
    pub best: Option<Solution>,
    /// Wall-clock time spent
    pub duration: Duration,
    /// Number of generations executed
    pub generations: u32,
}

impl CulturalResult {
    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }
}

/// A population-based metaheuristic solver.
///
/// Candidates are grids whose rows are each a permutation of 1..=N by
/// construction, so fitness only measures column duplicates and cage
/// violations (0 = solved, lower is better). A per-cell belief
/// distribution, re-estimated from the elite set every generation,
/// guides part of the mutation. The solver works on private copies of
/// the puzzle and never mutates the input grid.
pub struct CulturalSolver {
    width: usize,
    cages: Vec<Cage>,
    params: CulturalParams,
    belief: Square<Vec<f64>>,
    rng: StdRng,
}

impl CulturalSolver {
    /// Creates a solver seeded from entropy
    pub fn new(grid: &Grid, params: CulturalParams) -> Self {
        Self::with_rng(grid, params, StdRng::from_entropy())
    }

    /// Creates a solver with an explicit seed for reproducible runs
    pub fn with_seed(grid: &Grid, params: CulturalParams, seed: u64) -> Self {
        Self::with_rng(grid, params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: &Grid, params: CulturalParams, rng: StdRng) -> Self {
        let params = CulturalParams {
            population_size: params.population_size.max(20),
            elite_fraction: params.elite_fraction.max(0.05).min(0.4),
            max_generations: params.max_generations.max(10),
            mutation_rate: params.mutation_rate.max(0.0).min(1.0),
        };
        let width = grid.width();
        Self {
            width,
            cages: grid.cages().to_vec(),
            params,
            belief: Square::with_width_and_value(width, vec![1.0 / width as f64; width]),
            rng,
        }
    }

    /// Runs the evolutionary search until a zero-violation candidate
    /// appears, the generation budget runs out, or the time budget
    /// elapses.
    ///
    /// The time budget is checked once per generation, so a run may
    /// overrun it by up to one generation's cost.
    pub fn solve(&mut self, timeout: Duration) -> CulturalResult {
        let start = Instant::now();
        let mut population: Vec<Square<Value>> = (0..self.params.population_size)
            .map(|_| self.random_candidate())
            .collect();
        let mut best: Option<Square<Value>> = None;
        let mut best_fitness = u32::MAX;
        let mut generations = 0;

        for generation in 0..self.params.max_generations {
            let mut scored: Vec<(u32, Square<Value>)> = population
                .drain(..)
                .map(|candidate| (self.fitness(&candidate), candidate))
                .collect();
            scored.sort_by_key(|&(fitness, _)| fitness);
            generations += 1;

            if scored[0].0 < best_fitness {
                best_fitness = scored[0].0;
                best = Some(scored[0].1.clone());
                debug!("generation {}: best fitness {}", generation, best_fitness);
            }
            if best_fitness == 0 {
                info!("solved in {} generations ({:?})", generations, start.elapsed());
                return CulturalResult {
                    solved: true,
                    best,
                    duration: start.elapsed(),
                    generations,
                };
            }

            let elite_count =
                ((self.params.elite_fraction * self.params.population_size as f64) as usize).max(1);
            let elites: Vec<&Square<Value>> =
                scored[..elite_count].iter().map(|(_, g)| g).collect();
            self.update_belief(&elites);

            let mut next: Vec<Square<Value>> =
                scored[..elite_count].iter().map(|(_, g)| g.clone()).collect();
            while next.len() < self.params.population_size {
                let a = self.tournament(&scored);
                let b = self.tournament(&scored);
                let mut child = self.crossover(&scored[a].1, &scored[b].1);
                self.mutate(&mut child);
                next.push(child);
            }
            population = next;

            if start.elapsed() > timeout {
                debug!("time budget elapsed after generation {}", generation);
                break;
            }
        }

        info!(
            "stopped unsolved at fitness {} after {} generations ({:?})",
            best_fitness,
            generations,
            start.elapsed()
        );
        CulturalResult {
            solved: false,
            best,
            duration: start.elapsed(),
            generations,
        }
    }

    /// A grid whose rows are each an independent random permutation
    /// of 1..=N
    fn random_candidate(&mut self) -> Square<Value> {
        let mut candidate = Square::with_width_and_value(self.width, 0);
        for row in candidate.rows_mut() {
            for (i, cell) in row.iter_mut().enumerate() {
                *cell = i as Value + 1;
            }
            row.shuffle(&mut self.rng);
        }
        candidate
    }

    /// Counts constraint violations: per column, the number of missing
    /// distinct values; per cage, 1 if the cage is unsatisfied.
    fn fitness(&self, candidate: &Square<Value>) -> u32 {
        let mut violations = 0;
        for col in candidate.cols() {
            violations += (self.width - col.unique().count()) as u32;
        }
        for cage in &self.cages {
            let values: Vec<Value> = cage.cells().iter().map(|&cell| candidate[cell]).collect();
            // a zero is unreachable with the row-permutation
            // representation but counts as a violation if it appears
            if values.iter().any(|&v| v == 0)
                || !cage_satisfied(&values, cage.target(), cage.operator())
            {
                violations += 1;
            }
        }
        violations
    }

    /// Decays every cell's distribution, reinforces the values held by
    /// the elite set, and renormalizes.
    fn update_belief(&mut self, elites: &[&Square<Value>]) {
        for weights in self.belief.iter_mut() {
            for weight in weights.iter_mut() {
                *weight *= 1.0 - BELIEF_ALPHA;
            }
        }
        if elites.is_empty() {
            return;
        }
        let reinforcement = BELIEF_ALPHA / elites.len() as f64;
        for &elite in elites {
            for row in 0..self.width {
                for col in 0..self.width {
                    let coord = Coord::new(row, col);
                    let value = elite[coord];
                    self.belief[coord][value as usize - 1] += reinforcement;
                }
            }
        }
        let uniform = 1.0 / self.width as f64;
        for weights in self.belief.iter_mut() {
            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                for weight in weights.iter_mut() {
                    *weight = uniform;
                }
            } else {
                for weight in weights.iter_mut() {
                    *weight /= total;
                }
            }
        }
    }

    /// Samples three candidates uniformly and keeps the fittest
    fn tournament(&mut self, scored: &[(u32, Square<Value>)]) -> usize {
        index::sample(&mut self.rng, scored.len(), TOURNAMENT_SIZE)
            .into_iter()
            .min_by_key(|&i| scored[i].0)
            .unwrap()
    }

    /// Child inherits each row wholesale from one parent or the other,
    /// preserving the row-permutation invariant.
    fn crossover(&mut self, a: &Square<Value>, b: &Square<Value>) -> Square<Value> {
        let mut child = a.clone();
        for (child_row, b_row) in child.rows_mut().zip(b.rows()) {
            if self.rng.gen_bool(0.5) {
                child_row.copy_from_slice(b_row);
            }
        }
        child
    }

    /// Per row, sometimes swaps two positions; per cell, rarely
    /// resamples from the belief distribution. Resampling can break
    /// row uniqueness, so every row is repaired afterwards.
    fn mutate(&mut self, candidate: &mut Square<Value>) {
        let width = self.width;
        if width > 1 && self.params.mutation_rate > 0.0 {
            for row in candidate.rows_mut() {
                if self.rng.gen_bool(self.params.mutation_rate) {
                    let i = self.rng.gen_range(0, width);
                    let mut j = self.rng.gen_range(0, width - 1);
                    if j >= i {
                        j += 1;
                    }
                    row.swap(i, j);
                }
            }
        }
        for (row_index, row) in candidate.rows_mut().enumerate() {
            for (col, cell) in row.iter_mut().enumerate() {
                if self.rng.gen_bool(BELIEF_RESAMPLE_RATE) {
                    let weights = &self.belief[Coord::new(row_index, col)];
                    if let Ok(distribution) = WeightedIndex::new(weights.iter().copied()) {
                        *cell = distribution.sample(&mut self.rng) as Value + 1;
                    }
                }
            }
            repair_row(row);
        }
    }
}

/// Restores the row-permutation invariant: every duplicate value is
/// replaced with one of the row's currently missing values.
fn repair_row(row: &mut [Value]) {
    let width = row.len();
    let mut missing: Vec<Value> = (1..=width as Value)
        .filter(|value| !row.contains(value))
        .collect();
    let mut seen = vec![false; width + 1];
    for cell in row.iter_mut() {
        let value = *cell as usize;
        if seen[value] {
            // one missing value exists per duplicate
            *cell = missing.pop().unwrap();
        } else {
            seen[value] = true;
        }
    }
    debug_assert!(missing.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(row: &[Value]) -> bool {
        let width = row.len() as Value;
        (1..=width).all(|value| row.contains(&value))
    }

    fn solver(width: usize, seed: u64) -> CulturalSolver {
        let grid = Grid::new(width).unwrap();
        CulturalSolver::with_seed(&grid, CulturalParams::default(), seed)
    }

    #[test]
    fn random_candidate_rows_are_permutations() {
        let mut solver = solver(5, 1);
        for _ in 0..10 {
            let candidate = solver.random_candidate();
            for row in candidate.rows() {
                assert!(is_permutation(row));
            }
        }
    }

    #[test]
    fn repair_restores_permutation() {
        let mut row = vec![1, 1, 3, 3, 5];
        repair_row(&mut row);
        assert!(is_permutation(&row));
        // positions holding the first occurrence of a value are untouched
        assert_eq!(row[0], 1);
        assert_eq!(row[2], 3);
        assert_eq!(row[4], 5);

        let mut intact = vec![2, 4, 1, 3];
        repair_row(&mut intact);
        assert_eq!(intact, vec![2, 4, 1, 3]);
    }

    #[test]
    fn mutation_preserves_row_permutations() {
        let mut solver = solver(4, 2);
        let mut candidate = solver.random_candidate();
        for _ in 0..100 {
            solver.mutate(&mut candidate);
            for row in candidate.rows() {
                assert!(is_permutation(row));
            }
        }
    }

    #[test]
    fn crossover_takes_whole_rows() {
        let mut solver = solver(4, 3);
        let a = solver.random_candidate();
        let b = solver.random_candidate();
        let child = solver.crossover(&a, &b);
        for ((child_row, a_row), b_row) in child.rows().zip(a.rows()).zip(b.rows()) {
            assert!(child_row == a_row || child_row == b_row);
        }
    }

    #[test]
    fn fitness_counts_column_and_cage_violations() {
        let mut grid = Grid::new(2).unwrap();
        grid.add_cage(vec![Coord::new(0, 0)], '=', 1).unwrap();
        let solver = CulturalSolver::with_seed(&grid, CulturalParams::default(), 0);

        let mut solved = Square::with_width_and_value(2, 0);
        solved[Coord::new(0, 0)] = 1;
        solved[Coord::new(0, 1)] = 2;
        solved[Coord::new(1, 0)] = 2;
        solved[Coord::new(1, 1)] = 1;
        assert_eq!(solver.fitness(&solved), 0);

        // both columns duplicated, cage still satisfied
        let mut duplicated = solved.clone();
        duplicated[Coord::new(1, 0)] = 1;
        duplicated[Coord::new(1, 1)] = 2;
        assert_eq!(solver.fitness(&duplicated), 2);

        // rows swapped: columns fine, cage misses its target
        let mut missed = solved.clone();
        missed[Coord::new(0, 0)] = 2;
        missed[Coord::new(0, 1)] = 1;
        missed[Coord::new(1, 0)] = 1;
        missed[Coord::new(1, 1)] = 2;
        assert_eq!(solver.fitness(&missed), 1);
    }

    #[test]
    fn belief_rows_stay_normalized() {
        let mut solver = solver(3, 4);
        let elites: Vec<Square<Value>> = (0..3).map(|_| solver.random_candidate()).collect();
        let refs: Vec<&Square<Value>> = elites.iter().collect();
        solver.update_belief(&refs);
        for weights in solver.belief.iter() {
            let total: f64 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
            assert!(weights.iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn params_are_clamped() {
        let grid = Grid::new(3).unwrap();
        let solver = CulturalSolver::with_seed(
            &grid,
            CulturalParams {
                population_size: 1,
                elite_fraction: 0.9,
                max_generations: 0,
                mutation_rate: 2.0,
            },
            0,
        );
        assert_eq!(solver.params.population_size, 20);
        assert!((solver.params.elite_fraction - 0.4).abs() < f64::EPSILON);
        assert_eq!(solver.params.max_generations, 10);
        assert!((solver.params.mutation_rate - 1.0).abs() < f64::EPSILON);
    }
}
