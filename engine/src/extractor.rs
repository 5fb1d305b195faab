use async_trait::async_trait;
use singfit_audio::Waveform;
use thiserror::Error;

/// Errors from an embedding extractor implementation.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("input too short for embedding extraction")]
    TooShort,

    #[error("extractor failure: {0}")]
    Failed(String),
}

/// Produces a fixed-dimension voice embedding from a mono waveform.
///
/// Implementations wrap a pretrained speaker-embedding model; the engine
/// treats them as opaque, deterministic functions of the input. The engine
/// normalizes the returned vector, so implementations need not.
#[async_trait]
pub trait EmbeddingExtractor: Send + Sync {
    async fn extract(&self, waveform: &Waveform) -> Result<Vec<f32>, ExtractorError>;
}
