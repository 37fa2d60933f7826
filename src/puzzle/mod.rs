//! The KenKen puzzle model

pub use self::cage::{Cage, Operator};
pub use self::error::GridError;

mod cage;
mod error;

use std::fmt;
use std::fmt::Display;

use crate::collections::square::{Coord, Square};

/// The index of a cage within a puzzle's cage list
pub type CageId = usize;

/// A cell value; 0 means the cell is unassigned
pub type Value = i32;

/// A fully assigned grid of values
pub type Solution = Square<Value>;

/// An N×N KenKen puzzle
///
/// Holds the cell values (0 for unassigned) and the list of cages in
/// declaration order. Cages are not required to partition the grid;
/// see [`Cage`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    cells: Square<Value>,
    cages: Vec<Cage>,
}

impl Grid {
    /// Creates an empty grid of the given width
    pub fn new(width: usize) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::InvalidSize);
        }
        Ok(Self {
            width,
            cells: Square::with_width_and_value(width, 0),
            cages: Vec::new(),
        })
    }

    /// Returns the width (and height) of the grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// The cell values of the grid
    pub fn cells(&self) -> &Square<Value> {
        &self.cells
    }

    /// The cages of the grid, in declaration order
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// Appends a cage covering the given cells.
    ///
    /// The operator arrives as its symbol (`+ - * / =`). Cells must lie
    /// within the grid; beyond that there is no validation — cages may
    /// overlap or leave cells uncovered, and operator arity is not
    /// checked (a subtract or divide cage that is not two cells is
    /// simply never satisfiable).
    pub fn add_cage(
        &mut self,
        cells: Vec<Coord>,
        symbol: char,
        target: Value,
    ) -> Result<(), GridError> {
        for &cell in &cells {
            if cell.row() >= self.width || cell.col() >= self.width {
                return Err(GridError::OutOfBounds {
                    cell,
                    width: self.width,
                });
            }
        }
        let operator = Operator::from_symbol(symbol).ok_or(GridError::InvalidOperator(symbol))?;
        self.cages.push(Cage::new(cells, operator, target));
        Ok(())
    }

    /// Returns the value at the given cell
    pub fn get(&self, row: usize, col: usize) -> Result<Value, GridError> {
        self.check_range(row, col)?;
        Ok(self.cells[Coord::new(row, col)])
    }

    /// Sets the value at the given cell
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> Result<(), GridError> {
        self.check_range(row, col)?;
        self.cells[Coord::new(row, col)] = value;
        Ok(())
    }

    /// Returns a deep copy of the cell values as nested row vectors
    pub fn export_matrix(&self) -> Vec<Vec<Value>> {
        self.cells.rows().map(|row| row.to_vec()).collect()
    }

    /// Replaces the cell values wholesale; cages are untouched
    pub fn import_matrix(&mut self, matrix: &[Vec<Value>]) -> Result<(), GridError> {
        if matrix.len() != self.width || matrix.iter().any(|row| row.len() != self.width) {
            return Err(GridError::DimensionMismatch(self.width));
        }
        for (dest, src) in self.cells.rows_mut().zip(matrix) {
            dest.copy_from_slice(src);
        }
        Ok(())
    }

    /// Clears every cell to 0 and removes all cages
    pub fn reset(&mut self) {
        self.cells = Square::with_width_and_value(self.width, 0);
        self.cages.clear();
    }

    /// True if no cell is unassigned
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    fn check_range(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.width || col >= self.width {
            return Err(GridError::OutOfRange(Coord::new(row, col)));
        }
        Ok(())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells)
    }
}
