//! Tempo in beats per minute, always inside a configured range

use crate::types::time::{beat_value, Beats};
use std::fmt;

/// Lowest tempo offered by the default range
pub const MIN_BPM: u16 = 40;
/// Highest tempo offered by the default range
pub const MAX_BPM: u16 = 200;

/// A tempo in whole beats per minute.
///
/// Values are produced through [`TempoRange::clamp`], so a `Tempo` held by
/// the controller is always inside its configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u16);

impl Tempo {
    /// Create a tempo clamped to the default 40-200 BPM range
    pub fn new(bpm: u16) -> Self {
        TempoRange::default().clamp(bpm as i64)
    }

    pub fn bpm(self) -> u16 {
        self.0
    }

    /// Length of one beat in seconds
    pub fn seconds_per_beat(self) -> f64 {
        60.0 / self.0 as f64
    }

    /// Convert an exact beat count to seconds at this tempo
    pub fn beats_to_seconds(self, beats: Beats) -> f64 {
        beat_value(beats) * self.seconds_per_beat()
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo(100)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

/// Inclusive tempo bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoRange {
    pub min: u16,
    pub max: u16,
}

impl TempoRange {
    pub fn new(min: u16, max: u16) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Bring any requested value into range. Out-of-range input is never
    /// rejected, so typed or dragged input always yields a valid tempo.
    pub fn clamp(&self, bpm: i64) -> Tempo {
        Tempo(bpm.clamp(self.min as i64, self.max as i64) as u16)
    }

    pub fn contains(&self, bpm: i64) -> bool {
        bpm >= self.min as i64 && bpm <= self.max as i64
    }

    /// Number of BPM steps covered by the range
    pub fn span(&self) -> u16 {
        self.max - self.min
    }
}

impl Default for TempoRange {
    fn default() -> Self {
        Self::new(MIN_BPM, MAX_BPM)
    }
}
