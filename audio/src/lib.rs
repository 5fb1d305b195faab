//! Audio processing utilities for vocal analysis.
//!
//! This crate provides the mono PCM building blocks shared by the analysis
//! pipeline:
//!
//! - `waveform`: an immutable mono sample buffer with amplitude helpers
//! - `resample`: sample rate conversion via rubato
//!
//! # Example
//!
//! ```rust
//! use singfit_audio::Waveform;
//!
//! // One second of silence at 16kHz.
//! let wave = Waveform::new(vec![0.0; 16000], 16000);
//! assert_eq!(wave.duration_secs(), 1.0);
//! assert_eq!(wave.rms(), 0.0);
//! ```

pub mod error;
pub mod resample;
pub mod waveform;

pub use error::AudioError;
pub use waveform::Waveform;
