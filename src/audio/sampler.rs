//! Recorded piano samples
//!
//! The bank holds one recording every minor third from C3 to C6. Other
//! pitches are played from the nearest recording, resampled by
//! `2^(semitones / 12)`. Loading happens on a background thread; until it
//! finishes the bank reports itself not ready.

use super::adsr::{AdsrEnvelope, AdsrParams};
use anyhow::{Context, Result};
use etude_core::curriculum::SAMPLED_NOTES;
use etude_core::Pitch;
use hound::{SampleFormat, WavReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread;
use tracing::{debug, info, warn};

/// A decoded recording, mixed down to mono
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub frames: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    /// Decode a WAV file of any integer or float format
    pub fn load(path: &Path) -> Result<Self> {
        let reader =
            WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .with_context(|| format!("decoding {}", path.display()))?,
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("decoding {}", path.display()))?
            }
        };

        let frames = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        Ok(Self {
            frames,
            sample_rate: spec.sample_rate,
        })
    }
}

type Loaded = Vec<(Pitch, Arc<SampleBuffer>)>;

/// The piano sample map, filled in by a loader thread
#[derive(Debug, Clone, Default)]
pub struct SampleBank {
    samples: Arc<OnceLock<Loaded>>,
}

impl SampleBank {
    /// Start loading `<dir>/<stem>.wav` for every sampled note
    pub fn load_in_background(dir: impl Into<PathBuf>) -> Self {
        let bank = Self::default();
        let samples = bank.samples.clone();
        let dir = dir.into();

        thread::spawn(move || {
            let loaded = load_all(&dir);
            info!(count = loaded.len(), dir = %dir.display(), "piano samples loaded");
            let _ = samples.set(loaded);
        });
        bank
    }

    /// A bank built from buffers already in memory
    pub fn from_buffers(buffers: Vec<(Pitch, SampleBuffer)>) -> Self {
        let bank = Self::default();
        let mut loaded: Loaded = buffers
            .into_iter()
            .map(|(pitch, buffer)| (pitch, Arc::new(buffer)))
            .collect();
        loaded.sort_by_key(|(pitch, _)| *pitch);
        let _ = bank.samples.set(loaded);
        bank
    }

    pub fn is_ready(&self) -> bool {
        self.samples.get().is_some()
    }

    /// Number of recordings available (zero while loading)
    pub fn len(&self) -> usize {
        self.samples.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The closest recording to `pitch` and the playback rate that turns
    /// it into `pitch`. Ties go to the lower recording.
    pub fn nearest(&self, pitch: Pitch) -> Option<(Arc<SampleBuffer>, f64)> {
        let loaded = self.samples.get()?;
        let (source, buffer) = loaded
            .iter()
            .min_by_key(|(p, _)| (pitch.midi() as i32 - p.midi() as i32).abs())?;
        let semitones = pitch.midi() as i32 - source.midi() as i32;
        Some((buffer.clone(), 2f64.powf(semitones as f64 / 12.0)))
    }
}

fn load_all(dir: &Path) -> Loaded {
    let mut loaded = Vec::new();
    for (name, stem) in SAMPLED_NOTES.iter() {
        let Ok(pitch) = name.parse::<Pitch>() else {
            continue;
        };
        let path = dir.join(format!("{stem}.wav"));
        match SampleBuffer::load(&path) {
            Ok(buffer) => {
                debug!(note = %name, frames = buffer.frames.len(), "sample loaded");
                loaded.push((pitch, Arc::new(buffer)));
            }
            Err(e) => warn!("skipping sample for {}: {:#}", name, e),
        }
    }
    loaded
}

/// Plays one recording at a fixed rate, faded out at its written length
pub struct SamplePlayer {
    buffer: Arc<SampleBuffer>,
    position: f64,
    step: f64,
    gain: f32,
    hold: u64,
    envelope: AdsrEnvelope,
}

impl SamplePlayer {
    pub fn new(
        buffer: Arc<SampleBuffer>,
        rate: f64,
        output_rate: f32,
        gain: f32,
        hold_seconds: f64,
    ) -> Self {
        let step = rate * buffer.sample_rate as f64 / output_rate as f64;
        let mut envelope = AdsrEnvelope::new(AdsrParams::sample_fade(), output_rate);
        envelope.trigger();
        Self {
            buffer,
            position: 0.0,
            step,
            gain,
            hold: (hold_seconds.max(0.0) * output_rate as f64).round() as u64,
            envelope,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.envelope.is_finished() || self.position as usize + 1 >= self.buffer.frames.len()
    }

    pub fn next_sample(&mut self) -> f32 {
        let frames = &self.buffer.frames;
        let index = self.position as usize;
        if index + 1 >= frames.len() {
            return 0.0;
        }
        let frac = (self.position - index as f64) as f32;
        let value = frames[index] + (frames[index + 1] - frames[index]) * frac;
        self.position += self.step;

        if self.hold == 0 {
            self.envelope.release();
        } else {
            self.hold -= 1;
        }
        value * self.envelope.next_sample() * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn ramp(len: usize) -> SampleBuffer {
        SampleBuffer {
            frames: (0..len).map(|i| i as f32 / len as f32).collect(),
            sample_rate: 44100,
        }
    }

    fn pitch(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    #[test]
    fn test_exact_sample_plays_at_unit_rate() {
        let bank = SampleBank::from_buffers(vec![(pitch("C4"), ramp(10)), (pitch("D#4"), ramp(10))]);
        let (_, rate) = bank.nearest(pitch("C4")).unwrap();
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_nearest_sample_is_shifted() {
        let bank = SampleBank::from_buffers(vec![(pitch("C4"), ramp(10)), (pitch("D#4"), ramp(20))]);

        let (buffer, rate) = bank.nearest(pitch("D4")).unwrap();
        assert_eq!(buffer.frames.len(), 20);
        assert!((rate - 2f64.powf(-1.0 / 12.0)).abs() < 1e-12);

        let (buffer, rate) = bank.nearest(pitch("C#4")).unwrap();
        assert_eq!(buffer.frames.len(), 10);
        assert!((rate - 2f64.powf(1.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_bank_has_no_samples() {
        let bank = SampleBank::default();
        assert!(!bank.is_ready());
        assert!(bank.nearest(pitch("C4")).is_none());
    }

    #[test]
    fn test_player_fades_at_written_length() {
        let buffer = Arc::new(SampleBuffer {
            frames: vec![0.5; 44100],
            sample_rate: 44100,
        });
        let mut player = SamplePlayer::new(buffer, 1.0, 44100.0, 1.0, 0.05);
        let mut count = 0;
        while !player.is_finished() && count < 44100 {
            player.next_sample();
            count += 1;
        }
        assert!(player.is_finished());
        assert!(count > 2205 && count < 44100);
    }

    #[test]
    fn test_load_wav_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("C4v10.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(i16::MAX / 2).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = SampleBuffer::load(&path).unwrap();
        assert_eq!(buffer.sample_rate, 22050);
        assert_eq!(buffer.frames.len(), 100);
        assert!((buffer.frames[0] - 0.25).abs() < 0.001);

        let loaded = load_all(dir.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, pitch("C4"));
    }
}
