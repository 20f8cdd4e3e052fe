//! The voice that turns scheduled events into sound
//!
//! Clicks are short sine blips, higher on the accented beat. Notes use the
//! recorded piano when a sample bank is configured and fall back to the
//! synthesized piano otherwise.

use super::render::{SoundSpec, Trigger};
use super::sampler::SampleBank;
use crossbeam_channel::Sender;
use etude_core::{EventKind, ScheduledEvent, Voice};
use tracing::warn;

pub const ACCENT_CLICK_HZ: f32 = 1000.0;
pub const REGULAR_CLICK_HZ: f32 = 800.0;
/// Per-tone gain for chords, so a four-note chord is not four times louder
const CHORD_TONE_GAIN: f32 = 0.45;
const NOTE_GAIN: f32 = 0.8;

/// Where piano notes come from
#[derive(Debug, Clone)]
pub enum PianoSource {
    Synth,
    Sampled(SampleBank),
}

pub struct EngineVoice {
    triggers: Sender<Trigger>,
    piano: PianoSource,
}

impl EngineVoice {
    pub fn new(triggers: Sender<Trigger>, piano: PianoSource) -> Self {
        Self { triggers, piano }
    }

    pub fn piano(&self) -> &PianoSource {
        &self.piano
    }

    fn spec_for(&self, event: &ScheduledEvent) -> Option<SoundSpec> {
        let params = &event.params;
        let seconds = params.duration;

        if event.kind == EventKind::Beat {
            let frequency = if params.accent {
                ACCENT_CLICK_HZ
            } else {
                REGULAR_CLICK_HZ
            };
            return Some(SoundSpec::Click {
                frequency,
                gain: params.amplitude,
                seconds,
            });
        }

        let pitch = params.pitch?;
        let gain = params.amplitude
            * if event.kind == EventKind::ChordTone {
                CHORD_TONE_GAIN
            } else {
                NOTE_GAIN
            };

        let sampled = match &self.piano {
            PianoSource::Sampled(bank) => bank.nearest(pitch),
            PianoSource::Synth => None,
        };
        Some(match sampled {
            Some((buffer, rate)) => SoundSpec::Sample {
                buffer,
                rate,
                gain,
                seconds,
            },
            None => SoundSpec::Piano {
                frequency: pitch.frequency(),
                gain,
                seconds,
            },
        })
    }
}

impl Voice for EngineVoice {
    fn is_ready(&self) -> bool {
        match &self.piano {
            PianoSource::Synth => true,
            PianoSource::Sampled(bank) => bank.is_ready(),
        }
    }

    fn play(&mut self, event: &ScheduledEvent) {
        let Some(spec) = self.spec_for(event) else {
            return;
        };
        if self
            .triggers
            .try_send(Trigger {
                at: event.target_time,
                spec,
            })
            .is_err()
        {
            warn!(at = event.target_time, "renderer is gone, event dropped");
        }
    }
}
