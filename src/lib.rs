//! Solve KenKen puzzles
//!
//! A KenKen puzzle is an N×N grid partitioned into *cages*. Each cage
//! carries an arithmetic operator and a target number. A solution fills
//! the grid with values 1..=N such that every row and every column is a
//! permutation and the values in each cage combine under its operator
//! to the target.
//!
//! The crate provides the puzzle model ([`Grid`]), a pure constraint
//! engine, and two solving strategies:
//!
//! - [`solve::solve_backtracking`] — exhaustive depth-first search with
//!   cage, row, and column pruning
//! - [`solve::CulturalSolver`] — a genetic algorithm guided by a learned
//!   per-cell belief distribution

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

pub mod collections;
pub mod puzzle;
pub mod solve;

pub use crate::collections::square::{Coord, Square};
pub use crate::puzzle::{Cage, Grid, GridError, Operator, Solution, Value};
