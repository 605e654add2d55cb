use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Reasons a raw grid can be rejected when a board is constructed.
///
/// These are the only hard failures in the crate; an unsolvable puzzle is
/// reported as `None` from the searcher, not as an error.
#[derive(Debug, thiserror::Error)]
pub enum InvalidPuzzle {
    #[error("grid has {actual} rows, expected {expected}")]
    RowCountMismatch { expected: usize, actual: usize },
    #[error("row {row} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("value {value} at ({row}, {col}) is outside 0..={max}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: u8,
        max: u8,
    },
    #[error("{rows}x{cols} board exceeds the maximum dimension of {limit}")]
    DimensionTooLarge {
        rows: usize,
        cols: usize,
        limit: u8,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid puzzle: {inner}\n{backtrace}")]
    InvalidPuzzle {
        inner: Box<InvalidPuzzle>,
        backtrace: Box<Backtrace>,
    },
}

impl From<InvalidPuzzle> for Error {
    fn from(inner: InvalidPuzzle) -> Self {
        Error::InvalidPuzzle {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
