//! Frame-wise fundamental frequency detection (YIN).
//!
//! Classic YIN: difference function, cumulative mean normalized difference,
//! absolute threshold, parabolic interpolation. One detector instance is
//! reused across frames; its scratch buffers are sized from the frame length.

/// Configuration for [`Yin`].
#[derive(Debug, Clone)]
pub struct YinConfig {
    /// Analysis frame length in samples (default: 2048).
    pub frame_len: usize,
    /// Lowest detectable frequency in Hz (default: C2, 65.41).
    pub fmin_hz: f32,
    /// Highest detectable frequency in Hz (default: C7, 2093.0).
    pub fmax_hz: f32,
    /// CMNDF absolute threshold; lower is stricter (default: 0.15).
    pub threshold: f32,
}

impl Default for YinConfig {
    fn default() -> Self {
        Self {
            frame_len: 2048,
            fmin_hz: 65.41,
            fmax_hz: 2093.0,
            threshold: 0.15,
        }
    }
}

/// A reusable YIN pitch detector.
pub struct Yin {
    sample_rate: f32,
    cfg: YinConfig,
    diff: Vec<f32>,
    cmndf: Vec<f32>,
}

impl Yin {
    /// Creates a detector for the given sample rate with default config.
    pub fn new(sample_rate: u32) -> Self {
        Self::with_config(sample_rate, YinConfig::default())
    }

    /// Creates a detector with the given configuration.
    /// Panics if `frame_len` is 0 or the frequency band is inverted.
    pub fn with_config(sample_rate: u32, cfg: YinConfig) -> Self {
        assert!(cfg.frame_len > 0, "yin: frame_len must be positive");
        assert!(
            cfg.fmin_hz > 0.0 && cfg.fmin_hz < cfg.fmax_hz,
            "yin: invalid frequency band"
        );
        let half = cfg.frame_len / 2;
        Self {
            sample_rate: sample_rate as f32,
            cfg,
            diff: vec![0.0; half],
            cmndf: vec![0.0; half],
        }
    }

    /// Detects the fundamental frequency of one frame.
    ///
    /// Returns `(f0_hz, confidence)` with confidence in `[0, 1]`, or `None`
    /// for unvoiced frames, frames outside the configured band, or frames
    /// shorter than the configured length.
    pub fn detect(&mut self, frame: &[f32]) -> Option<(f32, f32)> {
        if frame.len() < self.cfg.frame_len {
            return None;
        }

        self.difference(frame);
        self.cumulative_mean_normalize();

        let tau = self.best_tau()?;
        let tau_refined = self.parabolic(tau);
        let f0 = self.sample_rate / tau_refined;

        if f0 < self.cfg.fmin_hz || f0 > self.cfg.fmax_hz {
            return None;
        }

        let confidence = (1.0 - self.cmndf[tau]).clamp(0.0, 1.0);
        Some((f0, confidence))
    }

    fn difference(&mut self, frame: &[f32]) {
        let half = self.diff.len();
        for tau in 0..half {
            let mut sum = 0.0f64;
            for j in 0..half {
                let d = (frame[j] - frame[j + tau]) as f64;
                sum += d * d;
            }
            self.diff[tau] = sum as f32;
        }
    }

    fn cumulative_mean_normalize(&mut self) {
        self.cmndf[0] = 1.0;
        let mut running_sum = 0.0f64;
        for tau in 1..self.cmndf.len() {
            running_sum += self.diff[tau] as f64;
            self.cmndf[tau] = if running_sum > 0.0 {
                (self.diff[tau] as f64 * tau as f64 / running_sum) as f32
            } else {
                1.0
            };
        }
    }

    fn best_tau(&self) -> Option<usize> {
        let min_tau = (self.sample_rate / self.cfg.fmax_hz).floor().max(1.0) as usize;
        let max_tau = ((self.sample_rate / self.cfg.fmin_hz) as usize).min(self.cmndf.len() - 1);
        if min_tau >= max_tau {
            return None;
        }

        // First local minimum below the absolute threshold.
        for tau in min_tau..max_tau {
            if self.cmndf[tau] < self.cfg.threshold && self.cmndf[tau] < self.cmndf[tau + 1] {
                return Some(tau);
            }
        }

        // Fall back to the global minimum if it is convincing enough.
        let mut best = min_tau;
        let mut best_val = self.cmndf[min_tau];
        for tau in min_tau..max_tau {
            if self.cmndf[tau] < best_val {
                best_val = self.cmndf[tau];
                best = tau;
            }
        }
        if best_val < 0.5 { Some(best) } else { None }
    }

    fn parabolic(&self, tau: usize) -> f32 {
        if tau == 0 || tau + 1 >= self.cmndf.len() {
            return tau as f32;
        }
        let s0 = self.cmndf[tau - 1];
        let s1 = self.cmndf[tau];
        let s2 = self.cmndf[tau + 1];
        let denom = 2.0 * (s0 - 2.0 * s1 + s2);
        if denom == 0.0 {
            return tau as f32;
        }
        let adjust = (s0 - s2) / denom;
        if adjust.is_finite() && adjust.abs() < 1.0 {
            tau as f32 + adjust
        } else {
            tau as f32
        }
    }
}
