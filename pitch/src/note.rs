//! Semitone scale math and note naming.
//!
//! Uses the MIDI convention throughout: 12 semitones per octave, anchored at
//! A4 = 440 Hz = semitone 69. Note names use sharps ("C#4", never "Db4").

use serde::{Deserialize, Serialize};

/// Semitone number of A4 (440 Hz).
pub const A4_SEMITONE: i32 = 69;

/// Reference frequency of A4 in Hz.
pub const A4_HZ: f64 = 440.0;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Converts a frequency in Hz to a fractional semitone number.
/// Returns `None` for non-positive or non-finite input.
pub fn hz_to_semitone(hz: f64) -> Option<f64> {
    if !hz.is_finite() || hz <= 0.0 {
        return None;
    }
    Some(A4_SEMITONE as f64 + 12.0 * (hz / A4_HZ).log2())
}

/// Converts a fractional semitone number to a frequency in Hz.
pub fn semitone_to_hz(semitone: f64) -> f64 {
    A4_HZ * 2.0_f64.powf((semitone - A4_SEMITONE as f64) / 12.0)
}

/// Returns the note name for an integer semitone, e.g. `note_name(60)` is "C4".
pub fn note_name(semitone: i32) -> String {
    let name = NAMES[semitone.rem_euclid(12) as usize];
    let octave = semitone.div_euclid(12) - 1;
    format!("{name}{octave}")
}

/// Parses a note name like "C3" or "F#5" back to its semitone number.
/// Accepts negative octaves ("A-1"). Returns `None` for malformed input.
pub fn parse_note(name: &str) -> Option<i32> {
    let rest = name.trim();
    if !rest.is_ascii() {
        return None;
    }
    let (pitch, octave_str) = match rest.as_bytes() {
        [_, b'#', ..] => rest.split_at(2),
        [_, ..] => rest.split_at(1),
        [] => return None,
    };
    let class = NAMES.iter().position(|&n| n == pitch)? as i32;
    let octave: i32 = octave_str.parse().ok()?;
    Some((octave + 1) * 12 + class)
}

/// A singable pitch range in integer semitones.
///
/// Invariant: `low <= high`. An unavailable range is represented as
/// `Option<VocalRange>` at the orchestrator boundary, never as a
/// half-defined pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocalRange {
    pub low: i32,
    pub high: i32,
}

impl VocalRange {
    /// Creates a range. Panics if `low > high`.
    pub fn new(low: i32, high: i32) -> Self {
        assert!(low <= high, "vocal range: low must not exceed high");
        Self { low, high }
    }

    /// Name of the lowest note, e.g. "C3".
    pub fn low_note(&self) -> String {
        note_name(self.low)
    }

    /// Name of the highest note, e.g. "C5".
    pub fn high_note(&self) -> String {
        note_name(self.high)
    }

    /// Width of the range in semitones.
    pub fn span(&self) -> i32 {
        self.high - self.low
    }

    /// Returns true if this range covers `[song_low, song_high]` within a
    /// symmetric tolerance of `tolerance` semitones on each side.
    pub fn covers(&self, song_low: i32, song_high: i32, tolerance: i32) -> bool {
        self.low - tolerance <= song_low && self.high + tolerance >= song_high
    }
}

impl std::fmt::Display for VocalRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.low_note(), self.high_note())
    }
}
