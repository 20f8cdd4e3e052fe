//! Diatonic chords for progression dictation
//!
//! Chords are named by roman numeral. Most are voiced from a fixed table
//! above the tonic; the dominant and the cadential 6/4 use voicings around
//! the tonic so the bass moves the way a piano cadence does.

use super::{Level, Mode};
use crate::error::{CurriculumError, ScriptError};
use crate::types::Pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgressionChord {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Semitones above the tonic for the plain voicing
    pub offsets: [i32; 4],
}

const fn chord(name: &'static str, symbol: &'static str, offsets: [i32; 4]) -> ProgressionChord {
    ProgressionChord {
        name,
        symbol,
        offsets,
    }
}

pub static CHORDS_MAJOR: [ProgressionChord; 5] = [
    chord("Tonic (I)", "I", [0, 4, 7, 12]),
    chord("Subdominant (IV)", "IV", [5, 9, 12, 17]),
    chord("Dominant (V)", "V", [7, 11, 14, 19]),
    chord("Submediant (vi)", "vi", [9, 12, 16, 21]),
    chord("Cadential 6/4 (I6/4)", "I6/4", [7, 12, 16, 19]),
];

pub static CHORDS_MINOR: [ProgressionChord; 5] = [
    chord("Tonic (i)", "i", [0, 3, 7, 12]),
    chord("Subdominant (iv)", "iv", [5, 8, 12, 17]),
    chord("Dominant (V)", "V", [7, 11, 14, 19]),
    chord("Submediant (VI)", "VI", [8, 12, 15, 20]),
    chord("Cadential 6/4 (i6/4)", "i6/4", [7, 12, 15, 19]),
];

pub fn chords_for(mode: Mode) -> &'static [ProgressionChord] {
    match mode {
        Mode::Major => &CHORDS_MAJOR,
        Mode::Minor => &CHORDS_MINOR,
    }
}

pub fn tonic(mode: Mode) -> &'static str {
    match mode {
        Mode::Major => "I",
        Mode::Minor => "i",
    }
}

pub fn cadential_six_four(mode: Mode) -> &'static str {
    match mode {
        Mode::Major => "I6/4",
        Mode::Minor => "i6/4",
    }
}

pub const DOMINANT: &str = "V";

/// Look up a chord by its roman numeral (exact case, since case carries
/// the quality)
pub fn chord_symbol(symbol: &str, mode: Mode) -> Result<&'static ProgressionChord, CurriculumError> {
    chords_for(mode)
        .iter()
        .find(|c| c.symbol == symbol.trim())
        .ok_or_else(|| CurriculumError::Unknown {
            kind: "chord symbol",
            name: format!("{} in {}", symbol.trim(), mode),
        })
}

/// Pitches of `symbol` in the key of `tonic_pitch`, lowest first
pub fn voicing(symbol: &str, mode: Mode, tonic_pitch: Pitch) -> Result<Vec<Pitch>, CurriculumError> {
    let chord = chord_symbol(symbol, mode)?;
    let offsets: [i32; 4] = if chord.symbol == cadential_six_four(mode) {
        [-5, 0, mode.third(), 7]
    } else if chord.symbol == DOMINANT {
        [-5, -1, 2, 7]
    } else {
        chord.offsets
    };

    offsets
        .iter()
        .map(|&semitones| {
            tonic_pitch.transpose(semitones).ok_or_else(|| {
                CurriculumError::Script(ScriptError::PitchOutOfRange {
                    root: tonic_pitch.midi(),
                    semitones,
                })
            })
        })
        .collect()
}

/// Fixed progressions offered at levels 5-8; empty elsewhere
pub fn preset_progressions(level: Level) -> &'static [&'static [&'static str]] {
    match level.number() {
        5 => &[&["I", "IV", "I"], &["I", "V", "I"]],
        6 => &[
            &["I", "IV", "I"],
            &["I", "V", "I"],
            &["i", "iv", "i"],
            &["i", "V", "i"],
        ],
        7 => &[
            &["I", "IV", "I"],
            &["I", "V", "I"],
            &["i", "iv", "i"],
            &["i", "V", "i"],
            &["I", "IV", "V"],
            &["i", "iv", "V"],
        ],
        8 => &[
            &["I", "IV", "V", "I"],
            &["I", "IV", "V", "vi"],
            &["I", "vi", "IV", "V"],
            &["I", "vi", "IV", "I"],
            &["i", "iv", "V", "i"],
            &["i", "iv", "V", "VI"],
            &["i", "VI", "iv", "V"],
            &["i", "VI", "iv", "i"],
        ],
        _ => &[],
    }
}

/// Chords available at `level` in `mode`. Levels below 5 have none.
pub fn level_chord_set(level: Level, mode: Mode) -> &'static [&'static str] {
    match (level.number(), mode) {
        (5, Mode::Major) | (6 | 7, Mode::Major) => &["I", "IV", "V"],
        (6 | 7, Mode::Minor) => &["i", "iv", "V"],
        (8 | 9, Mode::Major) => &["I", "IV", "V", "vi"],
        (8 | 9, Mode::Minor) => &["i", "iv", "V", "VI"],
        (10, Mode::Major) => &["I", "IV", "V", "vi", "I6/4"],
        (10, Mode::Minor) => &["i", "iv", "V", "VI", "i6/4"],
        _ => &[],
    }
}

/// Number of chords in a generated progression at `level`
pub fn progression_length(level: Level) -> usize {
    match level.number() {
        0..=5 => 3,
        6..=8 => 4,
        _ => 5,
    }
}

/// Key quality used at `level`; `None` means pick one at random
pub fn level_mode(level: Level) -> Option<Mode> {
    match level.number() {
        0..=5 => Some(Mode::Major),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midis(pitches: &[Pitch]) -> Vec<u8> {
        pitches.iter().map(|p| p.midi()).collect()
    }

    #[test]
    fn test_plain_voicing() {
        let iv = voicing("IV", Mode::Major, Pitch::MIDDLE_C).unwrap();
        assert_eq!(midis(&iv), vec![65, 69, 72, 77]);
    }

    #[test]
    fn test_dominant_voicing_surrounds_tonic() {
        let v = voicing("V", Mode::Minor, Pitch::MIDDLE_C).unwrap();
        assert_eq!(midis(&v), vec![55, 59, 62, 67]);
    }

    #[test]
    fn test_cadential_six_four() {
        let major = voicing("I6/4", Mode::Major, Pitch::MIDDLE_C).unwrap();
        assert_eq!(midis(&major), vec![55, 60, 64, 67]);
        let minor = voicing("i6/4", Mode::Minor, Pitch::MIDDLE_C).unwrap();
        assert_eq!(midis(&minor), vec![55, 60, 63, 67]);
    }

    #[test]
    fn test_symbols_are_mode_specific() {
        assert!(voicing("vi", Mode::Minor, Pitch::MIDDLE_C).is_err());
        assert!(chord_symbol("VI", Mode::Minor).is_ok());
    }

    #[test]
    fn test_presets_only_use_level_chords() {
        for n in 5..=8 {
            let level = Level::new(n).unwrap();
            for progression in preset_progressions(level) {
                let mode = if progression[0] == "I" { Mode::Major } else { Mode::Minor };
                for symbol in progression.iter() {
                    assert!(chord_symbol(symbol, mode).is_ok(), "{symbol} at level {n}");
                }
            }
        }
        assert!(preset_progressions(Level::new(9).unwrap()).is_empty());
    }

    #[test]
    fn test_level_shape() {
        assert_eq!(progression_length(Level::new(5).unwrap()), 3);
        assert_eq!(progression_length(Level::new(7).unwrap()), 4);
        assert_eq!(progression_length(Level::LAST), 5);
        assert_eq!(level_mode(Level::new(5).unwrap()), Some(Mode::Major));
        assert_eq!(level_mode(Level::new(6).unwrap()), None);
        assert!(level_chord_set(Level::new(5).unwrap(), Mode::Minor).is_empty());
        assert!(level_chord_set(Level::new(3).unwrap(), Mode::Major).is_empty());
    }
}
