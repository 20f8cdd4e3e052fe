//! Scheduler configuration
//!
//! The tick period and lookahead window trade CPU wakeups against tolerance
//! for late ticks: timing stays exact as long as no tick is delayed by more
//! than `lookahead - tick_period`.

use crate::error::ConfigError;
use crate::types::{Tempo, TempoRange};
use std::time::Duration;

/// Tunables for the lookahead scheduler and playback controller
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// How often the coarse wake timer fires
    pub tick_period: Duration,
    /// How far ahead of the clock events are committed to the voice
    pub lookahead: Duration,
    /// Delay between `start()` and the first event, in seconds
    pub start_offset: f64,
    /// Bounds applied to every tempo request
    pub tempo_range: TempoRange,
    /// Tempo used until the user picks one
    pub default_tempo: Tempo,
    /// Metronome bar length
    pub beats_per_bar: u32,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn with_lookahead(mut self, lookahead: Duration) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_start_offset(mut self, seconds: f64) -> Self {
        self.start_offset = seconds;
        self
    }

    pub fn with_tempo_range(mut self, range: TempoRange) -> Self {
        self.tempo_range = range;
        self.default_tempo = range.clamp(self.default_tempo.bpm() as i64);
        self
    }

    /// Set the initial tempo, clamped to the configured range
    pub fn with_default_tempo(mut self, bpm: i64) -> Self {
        self.default_tempo = self.tempo_range.clamp(bpm);
        self
    }

    pub fn with_beats_per_bar(mut self, beats: u32) -> Self {
        self.beats_per_bar = beats;
        self
    }

    /// Lookahead in seconds, as used against the audio clock
    pub fn lookahead_secs(&self) -> f64 {
        self.lookahead.as_secs_f64()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.lookahead <= self.tick_period {
            return Err(ConfigError::LookaheadTooShort {
                lookahead_ms: self.lookahead.as_millis(),
                tick_ms: self.tick_period.as_millis(),
            });
        }
        if self.beats_per_bar == 0 {
            return Err(ConfigError::EmptyBar);
        }
        if !self.start_offset.is_finite() || self.start_offset < 0.0 {
            return Err(ConfigError::BadStartOffset);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(25),
            lookahead: Duration::from_millis(100),
            start_offset: 0.0,
            tempo_range: TempoRange::default(),
            default_tempo: Tempo::default(),
            beats_per_bar: 4,
        }
    }
}
