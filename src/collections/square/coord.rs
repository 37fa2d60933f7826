use std::fmt;
use std::fmt::{Debug, Display};

/// A `Coord` represents the coordinates of an element in a `Square`,
/// as (row, column).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord([usize; 2]);

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self([row, col])
    }

    pub fn row(self) -> usize {
        self.0[0]
    }

    pub fn col(self) -> usize {
        self.0[1]
    }

    pub(crate) fn index_in(self, width: usize) -> usize {
        debug_assert!(self.row() < width && self.col() < width);
        self.row() * width + self.col()
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<[usize; 2]> for Coord {
    fn from(array: [usize; 2]) -> Self {
        Self(array)
    }
}
