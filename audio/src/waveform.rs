//! Mono PCM waveform container.

use crate::error::AudioError;
use crate::resample::resample;

/// An immutable buffer of mono float samples at a known sample rate.
///
/// Samples are normalized to `[-1, 1]`. A `Waveform` is owned by a single
/// request for its lifetime and is never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Creates a waveform from mono float samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Creates a waveform from interleaved-free mono 16-bit samples.
    pub fn from_i16(samples: &[i16], sample_rate: u32) -> Self {
        Self {
            samples: samples.iter().map(|&s| s as f32 / 32768.0).collect(),
            sample_rate,
        }
    }

    /// Returns the sample buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Returns the root-mean-square amplitude over the whole buffer.
    /// Returns 0.0 for an empty buffer.
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum / self.samples.len() as f64).sqrt() as f32
    }

    /// Returns a copy of this waveform converted to `target_rate`.
    /// Returns the same samples when the rate already matches.
    pub fn resampled(&self, target_rate: u32) -> Result<Waveform, AudioError> {
        if self.sample_rate == 0 || target_rate == 0 {
            return Err(AudioError::InvalidSampleRate(self.sample_rate.min(target_rate)));
        }
        if self.sample_rate == target_rate {
            return Ok(self.clone());
        }
        let samples = resample(&self.samples, self.sample_rate, target_rate)?;
        Ok(Waveform::new(samples, target_rate))
    }
}
