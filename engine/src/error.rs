use thiserror::Error;

use crate::extractor::ExtractorError;
use singfit_index::IndexError;

/// Request-aborting engine errors.
///
/// Pitch-estimation failures never appear here; they degrade the result
/// (range unavailable) instead of aborting it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Audio below the minimum analyzable duration.
    #[error("audio too short to analyze")]
    TooShort,

    /// Embedding extraction failed; no singer match is possible without it.
    #[error("embedding extraction failed: {0}")]
    Embedding(#[from] ExtractorError),

    /// Index misconfiguration or a query/index dimension mismatch.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// One of the parallel analyses exceeded the time budget. Retryable.
    #[error("analysis timed out")]
    Timeout,

    /// A background analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(String),
}
