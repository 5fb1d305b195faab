use thiserror::Error;

/// Errors returned by pitch estimation.
///
/// None of these abort a recommendation request; the orchestrator absorbs
/// them into an "unavailable" range and continues in degraded mode.
#[derive(Debug, Error)]
pub enum PitchError {
    /// Input was too short or too quiet to analyze.
    #[error("insufficient signal: audio too short or too quiet")]
    InsufficientSignal,

    /// No analysis frame survived the confidence and energy mask.
    #[error("no valid pitch detected in any frame")]
    NoValidPitch,

    /// The underlying tracker hit a numeric failure (degenerate input).
    #[error("pitch tracking failed: {0}")]
    Tracking(String),
}
