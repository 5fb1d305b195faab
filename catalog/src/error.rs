use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two singer profiles share the same id.
    #[error("duplicate singer id: {0}")]
    DuplicateSinger(String),

    /// A song list is keyed by a singer id with no profile.
    #[error("songs reference unknown singer: {0}")]
    UnknownSinger(String),

    /// A singer's embedding does not match the catalog dimensionality.
    #[error("singer {id}: embedding dimension {got}, expected {expected}")]
    EmbeddingDimension {
        id: String,
        expected: usize,
        got: usize,
    },
}
