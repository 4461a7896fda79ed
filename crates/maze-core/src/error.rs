use thiserror::Error;

/// Errors raised while building or querying a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The input had no rows, or only empty ones.
    #[error("grid input is empty")]
    Empty,
    /// A row's width differs from the first row's.
    #[error("line {line}: expected {expected} columns, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A required tag does not occur anywhere in the grid.
    #[error("grid has no '{0}' tile")]
    MissingTile(char),
    /// Deserialized cells do not fill the stated rectangle.
    #[error(
        "{width}x{height} grid needs {} cells, found {found}",
        width.saturating_mul(*height)
    )]
    CellCount {
        width: usize,
        height: usize,
        found: usize,
    },
}
