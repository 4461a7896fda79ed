//! **maze-core**: geometry and grid primitives for maze search.
//!
//! This crate provides the types shared by the search engine and the puzzle
//! solvers: integer points, facings, rectangles, and an owned character
//! [`Grid`] with bounds-checked lookup and neighbour enumeration.

pub mod error;
pub mod geom;
pub mod grid;
pub mod tile;

pub use error::GridError;
pub use geom::{Direction, Point, Range, Rotation};
pub use grid::Grid;
