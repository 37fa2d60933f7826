mod coord;

pub use self::coord::Coord;

use std::fmt;
use std::fmt::Display;
use std::ops::{Index, IndexMut};
use std::slice::{Chunks, ChunksMut, Iter, IterMut};

/// A container of elements represented in a square grid
#[derive(Clone, Debug, PartialEq)]
pub struct Square<T> {
    width: usize,
    elements: Vec<T>,
}

impl<T> Square<T> {
    /// Creates a new square with a specified width, filled with the default value
    pub fn with_width(width: usize) -> Self
    where
        T: Clone + Default,
    {
        Self {
            width,
            elements: vec![Default::default(); width.pow(2)],
        }
    }

    /// Creates a new square with a specified width, filled with a specified value
    pub fn with_width_and_value(width: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            elements: vec![value; width.pow(2)],
        }
    }

    /// Returns the width (and height) of the square
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of elements in the square
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the rows of the square
    pub fn rows(&self) -> Chunks<'_, T> {
        self.elements.chunks(self.width)
    }

    /// Returns a mutable iterator over the rows of the square
    pub fn rows_mut(&mut self) -> ChunksMut<'_, T> {
        self.elements.chunks_mut(self.width)
    }

    /// Returns an iterator over the columns of the square
    pub fn cols(&self) -> impl Iterator<Item = impl Iterator<Item = &T> + '_> + '_ {
        (0..self.width).map(move |col| (0..self.width).map(move |row| &self[Coord::new(row, col)]))
    }

    /// Returns an iterator over all elements in row-major order
    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns a mutable iterator over all elements in row-major order
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.elements.iter_mut()
    }
}

impl<T> Index<Coord> for Square<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &T {
        &self.elements[coord.index_in(self.width)]
    }
}

impl<T> IndexMut<Coord> for Square<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        let index = coord.index_in(self.width);
        &mut self.elements[index]
    }
}

impl<T: Display> Display for Square<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .elements
            .iter()
            .map(|e| e.to_string().len())
            .max()
            .unwrap_or(0);
        for row in self.rows() {
            for element in row {
                write!(f, "{:>1$} ", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
