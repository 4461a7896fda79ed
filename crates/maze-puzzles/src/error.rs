use maze_core::GridError;
use thiserror::Error;

use crate::computer::ComputerError;

/// Errors raised while parsing or solving a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A malformed input line. `line` is 1-based.
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },
    #[error("tile {0:?} appears more than once")]
    DuplicateTile(char),
    #[error("goal is unreachable")]
    Unreachable,
    #[error(transparent)]
    Computer(#[from] ComputerError),
}

impl PuzzleError {
    pub(crate) fn line(line: usize, reason: impl Into<String>) -> Self {
        PuzzleError::Line {
            line,
            reason: reason.into(),
        }
    }
}

/// Parse `field` as a number, reporting failures against `line`.
pub(crate) fn parse_field<T: std::str::FromStr>(
    field: &str,
    line: usize,
) -> Result<T, PuzzleError> {
    field
        .trim()
        .parse()
        .map_err(|_| PuzzleError::line(line, format!("invalid number {:?}", field.trim())))
}
