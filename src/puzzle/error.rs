use thiserror::Error;

use crate::collections::square::Coord;

/// Errors raised by malformed [`Grid`](crate::puzzle::Grid) construction
/// or access.
///
/// Every variant is raised eagerly at the offending call. Failing to
/// find a solution is not an error and is reported through the solver
/// result records instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested grid size is zero
    #[error("grid size must be at least 1")]
    InvalidSize,

    /// A cage cell lies outside the grid
    #[error("cage cell {cell} is out of bounds for grid size {width}")]
    OutOfBounds { cell: Coord, width: usize },

    /// A cage operator symbol is not one of `+ - * / =`
    #[error("operator must be one of + - * / =, got {0:?}")]
    InvalidOperator(char),

    /// A cell access lies outside the grid
    #[error("cell {0} is out of range")]
    OutOfRange(Coord),

    /// An imported matrix is not exactly N×N
    #[error("matrix dimensions do not match grid size {0}")]
    DimensionMismatch(usize),
}
