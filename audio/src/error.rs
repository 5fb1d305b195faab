use thiserror::Error;

/// Errors returned by audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("resampler error: {0}")]
    Resampler(String),
}

impl From<rubato::ResamplerConstructionError> for AudioError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        AudioError::Resampler(e.to_string())
    }
}

impl From<rubato::ResampleError> for AudioError {
    fn from(e: rubato::ResampleError) -> Self {
        AudioError::Resampler(e.to_string())
    }
}
