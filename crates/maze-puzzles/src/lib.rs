//! **maze-puzzles**: puzzle solvers built on `maze-paths`.
//!
//! Each module parses one puzzle's input and answers its questions with pure
//! functions; nothing is cached between calls.
//!
//! | Module | Engine piece |
//! |---|---|
//! | [`reindeer`] | dead-end reduction, turn-penalty search, best paths |
//! | [`memory`] | BFS distances, reachability after each obstacle |
//! | [`race`] | BFS distances, budgeted wall crossing |
//! | [`keypad`] | keypad grids with a gap, memoized press counts |
//! | [`computer`] | none: a small bytecode interpreter |

pub mod computer;
mod error;
pub mod keypad;
pub mod memory;
pub mod race;
pub mod reindeer;

pub use computer::ComputerError;
pub use error::PuzzleError;
