//! The mixer that runs inside the audio callback
//!
//! Voices never touch the stream. They send `Trigger`s stamped with an audio
//! time; the renderer converts each to a frame index and starts it on exactly
//! that frame. A trigger whose frame has already passed starts on the first
//! frame of the current buffer.

use super::oscillator::ToneOscillator;
use super::sampler::{SampleBuffer, SamplePlayer};
use crossbeam_channel::Receiver;
use etude_core::AudioTime;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// What to sound, independent of the device sample rate
#[derive(Debug, Clone)]
pub enum SoundSpec {
    Click {
        frequency: f32,
        gain: f32,
        seconds: f64,
    },
    Piano {
        frequency: f32,
        gain: f32,
        seconds: f64,
    },
    Sample {
        buffer: Arc<SampleBuffer>,
        rate: f64,
        gain: f32,
        seconds: f64,
    },
}

/// A sound and the audio time it must start at
#[derive(Debug, Clone)]
pub struct Trigger {
    pub at: AudioTime,
    pub spec: SoundSpec,
}

enum Sound {
    Tone(ToneOscillator),
    Sample(SamplePlayer),
}

impl Sound {
    fn new(spec: SoundSpec, sample_rate: f32) -> Self {
        match spec {
            SoundSpec::Click {
                frequency,
                gain,
                seconds,
            } => Sound::Tone(ToneOscillator::click(frequency, sample_rate, gain, seconds)),
            SoundSpec::Piano {
                frequency,
                gain,
                seconds,
            } => Sound::Tone(ToneOscillator::piano(frequency, sample_rate, gain, seconds)),
            SoundSpec::Sample {
                buffer,
                rate,
                gain,
                seconds,
            } => Sound::Sample(SamplePlayer::new(buffer, rate, sample_rate, gain, seconds)),
        }
    }

    fn next_sample(&mut self) -> f32 {
        match self {
            Sound::Tone(osc) => osc.next_sample(),
            Sound::Sample(player) => player.next_sample(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Sound::Tone(osc) => osc.is_finished(),
            Sound::Sample(player) => player.is_finished(),
        }
    }
}

/// Master gain before the limiter
const MASTER_GAIN: f32 = 0.5;

pub struct Renderer {
    triggers: Receiver<Trigger>,
    /// Waiting for their start frame, sorted by it
    pending: Vec<(u64, Sound)>,
    active: Vec<Sound>,
    /// Frames rendered since the stream opened; the clock reads this
    frames: Arc<AtomicU64>,
    sample_rate: f32,
    channels: usize,
}

impl Renderer {
    pub fn new(
        triggers: Receiver<Trigger>,
        frames: Arc<AtomicU64>,
        sample_rate: f32,
        channels: usize,
    ) -> Self {
        Self {
            triggers,
            pending: Vec::with_capacity(64),
            active: Vec::with_capacity(64),
            frames,
            sample_rate,
            channels: channels.max(1),
        }
    }

    /// Fill one interleaved output buffer and advance the frame counter
    pub fn render(&mut self, out: &mut [f32]) {
        let base = self.frames.load(Ordering::Acquire);

        for trigger in self.triggers.try_iter() {
            let frame = (trigger.at.max(0.0) * self.sample_rate as f64).round() as u64;
            let sound = Sound::new(trigger.spec, self.sample_rate);
            let index = self.pending.partition_point(|(f, _)| *f <= frame);
            self.pending.insert(index, (frame, sound));
        }

        let mut rendered = 0u64;
        for frame in out.chunks_mut(self.channels) {
            let now = base + rendered;
            let due = self.pending.partition_point(|(f, _)| *f <= now);
            self.active
                .extend(self.pending.drain(..due).map(|(_, sound)| sound));

            let mut mix = 0.0;
            for sound in &mut self.active {
                mix += sound.next_sample();
            }
            self.active.retain(|sound| !sound.is_finished());

            let value = soft_limit(mix * MASTER_GAIN);
            for sample in frame.iter_mut() {
                *sample = value;
            }
            rendered += 1;
        }

        self.frames.fetch_add(rendered, Ordering::AcqRel);
    }

    /// Sounds currently producing output
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Smooth saturation so stacked chords never clip
fn soft_limit(x: f32) -> f32 {
    x.tanh()
}
