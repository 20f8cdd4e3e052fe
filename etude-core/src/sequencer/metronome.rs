//! Metronome: an endless click stream with an accented downbeat

use super::{Pull, Sequencer};
use crate::types::{AudioTime, ScheduledEvent, Tempo};

/// Length of one click in seconds
pub const CLICK_SECONDS: f64 = 0.1;
/// Gain of the first beat of a bar
pub const ACCENT_AMPLITUDE: f32 = 1.0;
/// Gain of every other beat
pub const REGULAR_AMPLITUDE: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct MetronomeSequencer {
    beats_per_bar: u32,
    beat_in_bar: u32,
}

impl MetronomeSequencer {
    /// A bar length of zero is treated as one
    pub fn new(beats_per_bar: u32) -> Self {
        Self {
            beats_per_bar: beats_per_bar.max(1),
            beat_in_bar: 0,
        }
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    /// Position of the next click within the bar
    pub fn beat_in_bar(&self) -> u32 {
        self.beat_in_bar
    }
}

impl Default for MetronomeSequencer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Sequencer for MetronomeSequencer {
    fn pull(&mut self, at: AudioTime, tempo: Tempo) -> Pull {
        let accent = self.beat_in_bar == 0;
        let amplitude = if accent {
            ACCENT_AMPLITUDE
        } else {
            REGULAR_AMPLITUDE
        };
        let event = ScheduledEvent::beat(
            at,
            self.beat_in_bar as usize,
            accent,
            amplitude,
            CLICK_SECONDS,
        );
        self.beat_in_bar = (self.beat_in_bar + 1) % self.beats_per_bar;

        Pull::Events {
            events: vec![event],
            period: tempo.seconds_per_beat(),
        }
    }

    fn restart(&mut self) {
        self.beat_in_bar = 0;
    }

    fn describe(&self) -> String {
        format!("metronome, {} beats per bar", self.beats_per_bar)
    }
}
