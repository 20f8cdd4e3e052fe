//! Fixed scripts: precomputed, play-once note lists
//!
//! Interval, chord, progression and melody questions are all rendered into a
//! `FixedScript` before playback starts. Offsets are relative to the first
//! entry, in seconds, and are frozen when the script is built: changing the
//! controller tempo afterwards does not stretch a script already loaded.

use super::{Pull, Sequencer};
use crate::error::ScriptError;
use crate::types::time::beat_value;
use crate::types::{AudioTime, Beats, EventKind, Pitch, ScheduledEvent, Tempo};

/// Distance between the notes of a melodic interval or broken chord
pub const MELODIC_SPACING: f64 = 1.0;
/// How long each note of a melodic interval or broken chord rings
pub const MELODIC_SUSTAIN: f64 = 1.1;
/// How long a harmonic interval or block chord rings
pub const HARMONIC_SUSTAIN: f64 = 1.5;
/// Distance between progression chords
pub const PROGRESSION_SPACING: f64 = 1.1;
/// How long each progression chord rings
pub const PROGRESSION_SUSTAIN: f64 = 1.0;
/// Fraction of its written length a melody note is held, leaving a small
/// gap before the next note
pub const MELODY_SUSTAIN_RATIO: f64 = 0.9;

/// One written note of a melody
#[derive(Debug, Clone, PartialEq)]
pub struct MelodyNote {
    pub pitch: Pitch,
    pub beats: Beats,
}

impl MelodyNote {
    pub fn new(pitch: Pitch, beats: Beats) -> Self {
        Self { pitch, beats }
    }
}

/// How the two notes of an interval are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalPlayback {
    Ascending,
    Descending,
    Harmonic,
}

/// How the notes of a chord are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordPlayback {
    Block,
    Up,
    Down,
}

/// Pitches sounding together at one offset
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    /// Seconds after the start of the script
    pub offset: f64,
    /// Empty for a rest
    pub pitches: Vec<Pitch>,
    /// How long the pitches ring, in seconds
    pub sustain: f64,
}

/// An ordered, immutable list of timed entries
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScript {
    entries: Vec<ScriptEntry>,
    length: f64,
    label: String,
}

/// Accumulates entries on a running cursor
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    entries: Vec<ScriptEntry>,
    cursor: f64,
    length: f64,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `pitches` at the cursor, then move the cursor by `span`
    pub fn step(mut self, pitches: Vec<Pitch>, span: f64, sustain: f64) -> Self {
        let offset = self.cursor;
        self.cursor += span.max(0.0);
        self.push_entry(offset, pitches, sustain);
        self
    }

    /// Add `pitches` at an absolute offset. Offsets must not go backwards.
    pub fn at(mut self, offset: f64, pitches: Vec<Pitch>, sustain: f64) -> Self {
        let offset = offset.max(self.cursor);
        self.cursor = offset;
        self.push_entry(offset, pitches, sustain);
        self
    }

    /// Extend the script so it ends no earlier than `length`
    pub fn hold_until(mut self, length: f64) -> Self {
        self.length = self.length.max(length);
        self
    }

    pub fn build(self) -> Result<FixedScript, ScriptError> {
        if self.entries.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(FixedScript {
            entries: self.entries,
            length: self.length,
            label: String::from("script"),
        })
    }

    fn push_entry(&mut self, offset: f64, pitches: Vec<Pitch>, sustain: f64) {
        let sustain = sustain.max(0.0);
        self.length = self.length.max(offset + sustain);
        self.entries.push(ScriptEntry {
            offset,
            pitches,
            sustain,
        });
    }
}

fn transpose(root: Pitch, semitones: i32) -> Result<Pitch, ScriptError> {
    root.transpose(semitones)
        .ok_or(ScriptError::PitchOutOfRange {
            root: root.midi(),
            semitones,
        })
}

impl FixedScript {
    /// A melody at a fixed tempo.
    ///
    /// Onsets come from exact beat prefix sums, so the script length is
    /// exactly the written length at `tempo`.
    pub fn melody(notes: &[MelodyNote], tempo: Tempo) -> Result<Self, ScriptError> {
        let zero = Beats::from_integer(0);
        let mut elapsed = zero;
        let mut builder = ScriptBuilder::new();

        for (index, note) in notes.iter().enumerate() {
            if note.beats <= zero {
                return Err(ScriptError::NonPositiveDuration { index });
            }
            let offset = tempo.beats_to_seconds(elapsed);
            let sustain = tempo.beats_to_seconds(note.beats) * MELODY_SUSTAIN_RATIO;
            builder = builder.at(offset, vec![note.pitch], sustain);
            elapsed += note.beats;
        }

        Ok(builder
            .hold_until(tempo.beats_to_seconds(elapsed))
            .build()?
            .with_label(format!(
                "melody, {} notes, {} beats at {}",
                notes.len(),
                beat_value(elapsed),
                tempo
            )))
    }

    pub fn interval(
        root: Pitch,
        semitones: i32,
        playback: IntervalPlayback,
    ) -> Result<Self, ScriptError> {
        let top = transpose(root, semitones)?;
        let builder = match playback {
            IntervalPlayback::Ascending => ScriptBuilder::new()
                .step(vec![root], MELODIC_SPACING, MELODIC_SUSTAIN)
                .step(vec![top], MELODIC_SPACING, MELODIC_SUSTAIN),
            IntervalPlayback::Descending => ScriptBuilder::new()
                .step(vec![top], MELODIC_SPACING, MELODIC_SUSTAIN)
                .step(vec![root], MELODIC_SPACING, MELODIC_SUSTAIN),
            IntervalPlayback::Harmonic => {
                ScriptBuilder::new().step(vec![root, top], HARMONIC_SUSTAIN, HARMONIC_SUSTAIN)
            }
        };
        Ok(builder
            .build()?
            .with_label(format!("interval {root}+{semitones} {playback:?}")))
    }

    /// A chord given as semitone offsets above `root`, in voicing order
    pub fn chord(
        root: Pitch,
        offsets: &[i32],
        playback: ChordPlayback,
    ) -> Result<Self, ScriptError> {
        let pitches = offsets
            .iter()
            .map(|&s| transpose(root, s))
            .collect::<Result<Vec<_>, _>>()?;

        let builder = match playback {
            ChordPlayback::Block => {
                ScriptBuilder::new().step(pitches, HARMONIC_SUSTAIN, HARMONIC_SUSTAIN)
            }
            ChordPlayback::Up => pitches.into_iter().fold(ScriptBuilder::new(), |b, p| {
                b.step(vec![p], MELODIC_SPACING, MELODIC_SUSTAIN)
            }),
            ChordPlayback::Down => pitches.into_iter().rev().fold(ScriptBuilder::new(), |b, p| {
                b.step(vec![p], MELODIC_SPACING, MELODIC_SUSTAIN)
            }),
        };
        Ok(builder
            .build()?
            .with_label(format!("chord on {root} {playback:?}")))
    }

    /// Block chords one after another
    pub fn progression(voicings: &[Vec<Pitch>]) -> Result<Self, ScriptError> {
        let builder = voicings.iter().fold(ScriptBuilder::new(), |b, v| {
            b.step(v.clone(), PROGRESSION_SPACING, PROGRESSION_SUSTAIN)
        });
        Ok(builder
            .build()?
            .with_label(format!("progression of {} chords", voicings.len())))
    }

    /// Append `other` so it starts `gap` seconds after this script ends
    pub fn then(mut self, other: FixedScript, gap: f64) -> Self {
        let shift = self.length + gap.max(0.0);
        self.entries
            .extend(other.entries.into_iter().map(|mut entry| {
                entry.offset += shift;
                entry
            }));
        self.length = self.length.max(shift + other.length);
        self.label = format!("{}, then {}", self.label, other.label);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Seconds from the first onset until the last sound has finished
    pub fn total_duration(&self) -> f64 {
        self.length
    }

    /// Number of pitched events the script will dispatch
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|e| e.pitches.len()).sum()
    }
}

/// Plays a [`FixedScript`] once, one entry per pull
#[derive(Debug, Clone)]
pub struct ScriptSequencer {
    script: FixedScript,
    index: usize,
}

impl ScriptSequencer {
    pub fn new(script: FixedScript) -> Self {
        Self { script, index: 0 }
    }

    pub fn script(&self) -> &FixedScript {
        &self.script
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.script.entries.len()
    }
}

impl Sequencer for ScriptSequencer {
    fn pull(&mut self, at: AudioTime, _tempo: Tempo) -> Pull {
        let Some(entry) = self.script.entries.get(self.index) else {
            return Pull::Exhausted;
        };

        let kind = if entry.pitches.len() > 1 {
            EventKind::ChordTone
        } else {
            EventKind::Note
        };
        let events = entry
            .pitches
            .iter()
            .map(|&pitch| ScheduledEvent::tone(at, kind, pitch, entry.sustain, self.index))
            .collect();

        let next_offset = self
            .script
            .entries
            .get(self.index + 1)
            .map_or(self.script.length, |next| next.offset);
        let period = (next_offset - entry.offset).max(0.0);
        self.index += 1;

        Pull::Events { events, period }
    }

    fn restart(&mut self) {
        self.index = 0;
    }

    fn describe(&self) -> String {
        self.script.label.clone()
    }
}
