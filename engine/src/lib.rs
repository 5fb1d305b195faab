//! The vocal-match engine.
//!
//! Ties the analysis pieces together for one request: fans out embedding
//! extraction and pitch estimation over the same waveform, joins both,
//! ranks singers by voice similarity, and runs the recommendation
//! pipeline. The catalog and index are built once and shared read-only
//! across requests.

pub mod engine;
pub mod error;
pub mod extractor;

pub use engine::{Analysis, Engine, EngineConfig, RecommendOptions};
pub use error::EngineError;
pub use extractor::{EmbeddingExtractor, ExtractorError};
