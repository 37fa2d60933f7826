pub use self::operator::Operator;

mod operator;

use crate::collections::square::Coord;
use crate::puzzle::Value;

/// A cage in a KenKen puzzle
///
/// A cage is an ordered group of cells bound by a math operator and a
/// target number. The model does not require cages to partition the
/// grid: a cell may belong to zero cages or, if the caller declares
/// overlapping cages, to more than one. Constraint checking resolves
/// overlap by declaration order, using the first cage that contains the
/// cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cage {
    /// The positions of the cells in this cage, in declaration order
    cells: Box<[Coord]>,

    /// The math operator that must combine the numbers in the cage
    /// to produce the target number
    operator: Operator,

    /// The target number that must be produced using the numbers in this cage
    target: Value,
}

impl Cage {
    pub(crate) fn new(cells: impl Into<Box<[Coord]>>, operator: Operator, target: Value) -> Self {
        Self {
            cells: cells.into(),
            operator,
            target,
        }
    }

    /// The positions of the cells in the cage
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// The math operator on the cage
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The number on the cage
    pub fn target(&self) -> Value {
        self.target
    }
}
