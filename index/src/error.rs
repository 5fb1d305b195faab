use thiserror::Error;

/// Errors returned by index construction and search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// A vector's dimensionality does not match the index.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The index was built from zero entries.
    #[error("index is empty")]
    Empty,
}
