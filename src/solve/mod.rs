//! Solve KenKen puzzles
//!
//! Two strategies over the same constraint engine: an exact
//! backtracking search ([`solve_backtracking`]) and a population-based
//! cultural algorithm ([`CulturalSolver`]). Both are synchronous and
//! single-threaded; a call blocks for its full duration.

pub use self::backtrack::{solve_backtracking, BacktrackResult};
pub use self::constraint::{
    cage_partial_valid, cage_satisfied, check_placement, row_col_valid, CageMap,
};
pub use self::cultural::{CulturalParams, CulturalResult, CulturalSolver};

mod backtrack;
mod constraint;
mod cultural;
