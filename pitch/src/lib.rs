//! Vocal range estimation.
//!
//! Converts a mono waveform into a singable pitch range:
//!
//! - `note`: semitone (MIDI) scale math and note naming, anchored at A4 = 440 Hz
//! - `yin`: frame-wise fundamental frequency detection (YIN)
//! - `estimator`: the full range pipeline (frame, filter, percentile-clip)
//!
//! # Example
//!
//! ```rust
//! use singfit_pitch::note::{note_name, parse_note};
//!
//! assert_eq!(note_name(69), "A4");
//! assert_eq!(parse_note("C3"), Some(48));
//! ```

pub mod error;
pub mod estimator;
pub mod note;
pub mod yin;

pub use error::PitchError;
pub use estimator::{EstimatorConfig, PitchAnalysis, PitchFrame, PitchTrackEstimator};
pub use note::VocalRange;
