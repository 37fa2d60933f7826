//! Generic data structures

pub mod square;

pub use self::square::Square;
