//! Melody playback items (RCM level 10)
//!
//! Each item is heard once with its tonic triad as a key prelude, then may
//! be replayed without the prelude.

use super::Mode;
use crate::error::CurriculumError;
use crate::sequencer::{FixedScript, MelodyNote, ScriptBuilder};
use crate::types::time::snap_beats;
use crate::types::{Pitch, Tempo};

/// How long the tonic triad rings before the melody
pub const PRELUDE_SECONDS: f64 = 2.0;
/// Silence between the prelude and the first melody note
pub const PRELUDE_GAP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyItem {
    pub key: &'static str,
    pub time_signature: &'static str,
    pub tonic: &'static str,
    pub mode: Mode,
    pub tempo: u16,
    /// Note name and length in beats
    pub notes: &'static [(&'static str, f64)],
}

fn parse_note(name: &str) -> Result<Pitch, CurriculumError> {
    name.parse().map_err(|_| CurriculumError::Unknown {
        kind: "note",
        name: name.to_string(),
    })
}

impl MelodyItem {
    pub fn tempo(&self) -> Tempo {
        Tempo::new(self.tempo)
    }

    pub fn tonic_pitch(&self) -> Result<Pitch, CurriculumError> {
        parse_note(self.tonic)
    }

    /// Root position tonic triad, the key prelude
    pub fn tonic_triad(&self) -> Result<Vec<Pitch>, CurriculumError> {
        let tonic = self.tonic_pitch()?;
        [0, self.mode.third(), 7]
            .iter()
            .map(|&s| {
                tonic.transpose(s).ok_or(CurriculumError::Unknown {
                    kind: "note",
                    name: format!("{} + {}", self.tonic, s),
                })
            })
            .collect()
    }

    pub fn melody_notes(&self) -> Result<Vec<MelodyNote>, CurriculumError> {
        self.notes
            .iter()
            .map(|&(name, beats)| parse_note(name).map(|pitch| MelodyNote::new(pitch, snap_beats(beats))))
            .collect()
    }

    /// The melody at its own tempo, optionally preceded by the tonic triad
    pub fn script(&self, with_prelude: bool) -> Result<FixedScript, CurriculumError> {
        let melody = FixedScript::melody(&self.melody_notes()?, self.tempo())?
            .with_label(format!("melody in {} ({}, {})", self.key, self.time_signature, self.tempo()));
        if !with_prelude {
            return Ok(melody);
        }
        let prelude = ScriptBuilder::new()
            .step(self.tonic_triad()?, PRELUDE_SECONDS, PRELUDE_SECONDS)
            .build()?
            .with_label(format!("{} triad", self.key));
        Ok(prelude.then(melody, PRELUDE_GAP))
    }

    /// Written length of the melody in beats
    pub fn total_beats(&self) -> f64 {
        self.notes.iter().map(|(_, beats)| beats).sum()
    }
}

pub static RCM10_MELODIES: [MelodyItem; 11] = [
    MelodyItem {
        key: "A Major",
        time_signature: "2/4",
        tonic: "A4",
        mode: Mode::Major,
        tempo: 60,
        notes: &[
            ("A4", 0.75),
            ("B4", 0.25),
            ("C#5", 0.5),
            ("F#5", 0.5),
            ("E5", 0.5),
            ("G#5", 0.5),
            ("A5", 1.0),
        ],
    },
    MelodyItem {
        key: "Ab Major",
        time_signature: "3/4",
        tonic: "G#4",
        mode: Mode::Major,
        tempo: 120,
        notes: &[
            ("D#5", 1.5),
            ("C#5", 0.5),
            ("C5", 1.0),
            ("C5", 1.5),
            ("A#4", 0.5),
            ("G#4", 1.0),
            ("G4", 2.0),
            ("A#4", 1.0),
            ("G#4", 3.0),
        ],
    },
    MelodyItem {
        key: "G minor",
        time_signature: "4/4",
        tonic: "G4",
        mode: Mode::Minor,
        tempo: 80,
        notes: &[
            ("D5", 1.0),
            ("A#4", 0.5),
            ("G4", 0.5),
            ("D#5", 1.0),
            ("D#5", 1.0),
            ("D5", 1.5),
            ("C5", 0.5),
            ("A#4", 2.0),
        ],
    },
    MelodyItem {
        key: "E minor",
        time_signature: "3/4",
        tonic: "E4",
        mode: Mode::Minor,
        tempo: 120,
        notes: &[
            ("B4", 1.0),
            ("G5", 1.0),
            ("F#5", 1.0),
            ("E5", 2.0),
            ("E5", 1.0),
            ("D#5", 1.5),
            ("E5", 0.5),
            ("F#5", 1.0),
            ("E5", 3.0),
        ],
    },
    MelodyItem {
        key: "D major",
        time_signature: "3/4",
        tonic: "D4",
        mode: Mode::Major,
        tempo: 120,
        notes: &[
            ("D4", 1.0),
            ("B4", 1.0),
            ("A4", 1.0),
            ("E4", 1.5),
            ("F#4", 0.5),
            ("G4", 1.0),
            ("F#4", 2.0),
            ("A4", 1.0),
            ("D5", 3.0),
        ],
    },
    MelodyItem {
        key: "Bb major",
        time_signature: "2/4",
        tonic: "A#4",
        mode: Mode::Major,
        tempo: 80,
        notes: &[
            ("A#4", 1.0),
            ("D5", 0.5),
            ("A#4", 0.5),
            ("G4", 0.5),
            ("A#4", 0.5),
            ("A4", 0.75),
            ("C5", 0.25),
            ("A#4", 2.0),
        ],
    },
    MelodyItem {
        key: "C minor",
        time_signature: "4/4",
        tonic: "C4",
        mode: Mode::Minor,
        tempo: 80,
        notes: &[
            ("D#5", 0.5),
            ("D5", 0.5),
            ("C5", 0.5),
            ("G4", 0.5),
            ("G#4", 1.5),
            ("G#4", 0.5),
            ("G4", 1.0),
            ("A4", 0.5),
            ("B4", 0.5),
            ("C5", 2.0),
        ],
    },
    MelodyItem {
        key: "A minor",
        time_signature: "6/8",
        tonic: "A4",
        mode: Mode::Minor,
        tempo: 120,
        notes: &[
            ("A4", 1.5),
            ("B4", 0.5),
            ("C5", 1.0),
            ("D5", 1.5),
            ("E5", 0.5),
            ("F5", 1.0),
            ("E5", 2.0),
            ("G#4", 1.0),
            ("A4", 3.0),
        ],
    },
    MelodyItem {
        key: "G major",
        time_signature: "4/4",
        tonic: "G4",
        mode: Mode::Major,
        tempo: 120,
        notes: &[
            ("G4", 1.0),
            ("G5", 1.0),
            ("F#5", 1.5),
            ("D5", 0.5),
            ("D5", 1.0),
            ("C5", 0.5),
            ("B4", 0.5),
            ("A4", 2.0),
            ("G4", 4.0),
        ],
    },
    MelodyItem {
        key: "F major",
        time_signature: "6/8",
        tonic: "F4",
        mode: Mode::Major,
        tempo: 120,
        notes: &[
            ("C5", 1.0),
            ("F4", 1.0),
            ("A4", 1.0),
            ("A#4", 1.0),
            ("D4", 1.0),
            ("F4", 1.0),
            ("E4", 2.0),
            ("G4", 1.0),
            ("F4", 3.0),
        ],
    },
    MelodyItem {
        key: "F# minor",
        time_signature: "2/4",
        tonic: "F#4",
        mode: Mode::Minor,
        tempo: 60,
        notes: &[
            ("C#5", 0.5),
            ("A4", 1.0),
            ("F#4", 0.5),
            ("D5", 0.5),
            ("B4", 1.0),
            ("F#4", 0.5),
            ("F4", 0.5),
            ("F#4", 0.5),
            ("G#4", 1.0),
            ("F#4", 2.0),
        ],
    },
];

/// Find a melody by key name, ignoring case
pub fn melody_in(key: &str) -> Result<&'static MelodyItem, CurriculumError> {
    RCM10_MELODIES
        .iter()
        .find(|m| m.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| CurriculumError::Unknown {
            kind: "melody key",
            name: key.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_note_parses() {
        for item in RCM10_MELODIES.iter() {
            assert!(item.melody_notes().is_ok(), "{}", item.key);
            assert_eq!(item.tonic_triad().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_melody_script_length() {
        let item = melody_in("a major").unwrap();
        let script = item.script(false).unwrap();
        // 4 beats at 60 BPM
        assert_eq!(script.total_duration(), 4.0);
        assert_eq!(script.event_count(), 7);
    }

    #[test]
    fn test_prelude_precedes_melody() {
        let item = melody_in("G minor").unwrap();
        let script = item.script(true).unwrap();
        let first = &script.entries()[0];
        let pitches: Vec<String> = first.pitches.iter().map(|p| p.name()).collect();
        assert_eq!(pitches, vec!["G4", "A#4", "D5"]);
        assert!((script.entries()[1].offset - 2.1).abs() < 1e-12);
        // 8 beats at 80 BPM after the prelude
        assert!((script.total_duration() - (2.1 + 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_key() {
        assert!(melody_in("H major").is_err());
    }
}
