//! Vocal range estimation pipeline.
//!
//! Resamples to a fixed analysis rate, runs frame-wise YIN over the vocal
//! band, masks frames by voicing confidence and energy, then percentile-clips
//! the surviving semitone distribution into a `[lowest, highest]` range.
//! Percentiles, not min/max: a single tracking glitch must never become the
//! reported top note.

use singfit_audio::Waveform;

use crate::error::PitchError;
use crate::note::{VocalRange, hz_to_semitone};
use crate::yin::{Yin, YinConfig};

/// Configuration for [`PitchTrackEstimator`].
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Fixed analysis sample rate (default: 16000).
    pub analysis_rate: u32,
    /// Analysis frame length in samples (default: 2048).
    pub frame_len: usize,
    /// Hop between frames in samples (default: 512).
    pub hop: usize,
    /// Lowest tracked frequency in Hz (default: C2, 65.41).
    pub fmin_hz: f32,
    /// Highest tracked frequency in Hz (default: C7, 2093.0).
    pub fmax_hz: f32,
    /// Minimum analyzable duration in seconds (default: 0.5).
    pub min_duration_secs: f32,
    /// Global RMS below which the input counts as silence (default: 1e-3).
    pub silence_rms: f32,
    /// Per-frame voicing confidence threshold (default: 0.6).
    pub confidence_threshold: f32,
    /// Per-frame RMS energy floor (default: 0.05).
    pub energy_floor: f32,
    /// Percentile for the range floor (default: 1.0).
    pub low_percentile: f64,
    /// Percentile for the range ceiling (default: 99.0).
    pub high_percentile: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            analysis_rate: 16000,
            frame_len: 2048,
            hop: 512,
            fmin_hz: 65.41,
            fmax_hz: 2093.0,
            min_duration_secs: 0.5,
            silence_rms: 1e-3,
            confidence_threshold: 0.6,
            energy_floor: 0.05,
            low_percentile: 1.0,
            high_percentile: 99.0,
        }
    }
}

/// One analysis frame of the pitch track.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchFrame {
    /// Frame start time in seconds.
    pub time: f32,
    /// Detected fundamental frequency, if the frame is voiced.
    pub f0_hz: Option<f32>,
    /// Voicing confidence in `[0, 1]`; 0 for unvoiced frames.
    pub confidence: f32,
    /// Frame RMS energy.
    pub energy: f32,
}

/// Result of a successful estimation.
#[derive(Debug, Clone)]
pub struct PitchAnalysis {
    /// The percentile-clipped vocal range.
    pub range: VocalRange,
    /// The full time-ascending frame series, for display purposes.
    pub frames: Vec<PitchFrame>,
}

/// Estimates a vocal range from a waveform.
pub struct PitchTrackEstimator {
    cfg: EstimatorConfig,
}

impl Default for PitchTrackEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchTrackEstimator {
    /// Creates an estimator with default configuration.
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    /// Creates an estimator with the given configuration.
    /// Panics on a degenerate config (zero hop, inverted band or percentiles).
    pub fn with_config(cfg: EstimatorConfig) -> Self {
        assert!(cfg.hop > 0, "estimator: hop must be positive");
        assert!(cfg.frame_len > 0, "estimator: frame_len must be positive");
        assert!(
            cfg.low_percentile <= cfg.high_percentile,
            "estimator: inverted percentiles"
        );
        Self { cfg }
    }

    /// Estimates the vocal range of `waveform`.
    ///
    /// Deterministic: the same input always yields the same result. All
    /// failure variants mean "range unavailable" to the caller; none of them
    /// are hard faults.
    pub fn estimate(&self, waveform: &Waveform) -> Result<PitchAnalysis, PitchError> {
        let wave = waveform
            .resampled(self.cfg.analysis_rate)
            .map_err(|e| PitchError::Tracking(e.to_string()))?;

        if wave.duration_secs() < self.cfg.min_duration_secs {
            return Err(PitchError::InsufficientSignal);
        }
        if wave.rms() < self.cfg.silence_rms {
            return Err(PitchError::InsufficientSignal);
        }
        if wave.samples().iter().any(|s| !s.is_finite()) {
            return Err(PitchError::Tracking("non-finite sample in input".into()));
        }

        let frames = self.track(wave.samples(), wave.sample_rate());

        let valid: Vec<f64> = frames
            .iter()
            .filter(|f| {
                f.confidence > self.cfg.confidence_threshold && f.energy > self.cfg.energy_floor
            })
            .filter_map(|f| f.f0_hz)
            .filter_map(|hz| hz_to_semitone(hz as f64))
            .collect();

        if valid.is_empty() {
            return Err(PitchError::NoValidPitch);
        }

        let mut sorted = valid;
        sorted.sort_by(|a, b| a.total_cmp(b));

        let low = percentile(&sorted, self.cfg.low_percentile).round() as i32;
        let high = percentile(&sorted, self.cfg.high_percentile).round() as i32;

        Ok(PitchAnalysis {
            range: VocalRange::new(low, high),
            frames,
        })
    }

    /// Runs YIN and per-frame RMS over the shared frame/hop grid.
    fn track(&self, samples: &[f32], sample_rate: u32) -> Vec<PitchFrame> {
        let mut yin = Yin::with_config(
            sample_rate,
            YinConfig {
                frame_len: self.cfg.frame_len,
                fmin_hz: self.cfg.fmin_hz,
                fmax_hz: self.cfg.fmax_hz,
                ..YinConfig::default()
            },
        );

        let mut frames = Vec::new();
        if samples.len() < self.cfg.frame_len {
            return frames;
        }

        let mut start = 0;
        while start + self.cfg.frame_len <= samples.len() {
            let frame = &samples[start..start + self.cfg.frame_len];
            let energy = frame_rms(frame);
            let (f0_hz, confidence) = match yin.detect(frame) {
                Some((f0, conf)) => (Some(f0), conf),
                None => (None, 0.0),
            };
            frames.push(PitchFrame {
                time: start as f32 / sample_rate as f32,
                f0_hz,
                confidence,
                energy,
            });
            start += self.cfg.hop;
        }
        frames
    }
}

fn frame_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / frame.len() as f64).sqrt() as f32
}

/// Linear-interpolated percentile over a sorted slice. `p` in `[0, 100]`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
