//! Events committed to a voice at an exact audio time
//!
//! A `ScheduledEvent` is created by a sequencer inside one scheduler tick and
//! handed to the voice immediately. Nothing keeps it afterwards.

use crate::types::pitch::Pitch;
use crate::types::time::AudioTime;

/// What kind of sound an event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Metronome click
    Beat,
    /// A single melodic note
    Note,
    /// One tone of a chord or harmonic interval; siblings share the target time
    ChordTone,
}

/// Rendering parameters for one event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventParams {
    /// Pitch to sound; `None` for clicks
    pub pitch: Option<Pitch>,
    /// First beat of a bar
    pub accent: bool,
    /// Linear gain, 0.0-1.0
    pub amplitude: f32,
    /// How long the sound is held, in seconds
    pub duration: f64,
}

/// An event stamped with the exact time it must sound
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledEvent {
    /// When the voice must start the sound, on the session clock
    pub target_time: AudioTime,
    pub kind: EventKind,
    pub params: EventParams,
    /// Beat within the bar for clicks, entry index for script notes
    pub step: usize,
}

impl ScheduledEvent {
    /// A metronome click
    pub fn beat(target_time: AudioTime, step: usize, accent: bool, amplitude: f32, duration: f64) -> Self {
        Self {
            target_time,
            kind: EventKind::Beat,
            params: EventParams {
                pitch: None,
                accent,
                amplitude,
                duration,
            },
            step,
        }
    }

    /// A pitched event, `Note` or `ChordTone`
    pub fn tone(
        target_time: AudioTime,
        kind: EventKind,
        pitch: Pitch,
        duration: f64,
        step: usize,
    ) -> Self {
        Self {
            target_time,
            kind,
            params: EventParams {
                pitch: Some(pitch),
                accent: false,
                amplitude: 1.0,
                duration,
            },
            step,
        }
    }

    pub fn is_beat(&self) -> bool {
        self.kind == EventKind::Beat
    }

    /// Audio time at which the sound stops
    pub fn end_time(&self) -> AudioTime {
        self.target_time + self.params.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_event() {
        let event = ScheduledEvent::beat(2.0, 0, true, 1.0, 0.1);
        assert!(event.is_beat());
        assert!(event.params.accent);
        assert!(event.params.pitch.is_none());
        assert!((event.end_time() - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_tone_event() {
        let event = ScheduledEvent::tone(1.0, EventKind::ChordTone, Pitch::MIDDLE_C, 1.5, 3);
        assert!(!event.is_beat());
        assert_eq!(event.params.pitch, Some(Pitch::MIDDLE_C));
        assert_eq!(event.step, 3);
        assert!(!event.params.accent);
    }
}
