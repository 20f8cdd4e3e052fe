//! Pitches as MIDI note numbers, with letter/octave spelling

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A MIDI note number (60 = C4, 69 = A4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("'{0}' is not a note name (expected e.g. C4, F#3, Bb5)")]
    BadName(String),
    #[error("MIDI note {0} is outside 0-127")]
    OutOfRange(i32),
}

impl Pitch {
    pub const MIDDLE_C: Pitch = Pitch(60);

    pub fn from_midi(midi: i32) -> Result<Self, PitchError> {
        if (0..=127).contains(&midi) {
            Ok(Pitch(midi as u8))
        } else {
            Err(PitchError::OutOfRange(midi))
        }
    }

    pub fn midi(self) -> u8 {
        self.0
    }

    /// Shift by a number of semitones, `None` if the result leaves MIDI range
    pub fn transpose(self, semitones: i32) -> Option<Pitch> {
        Pitch::from_midi(self.0 as i32 + semitones).ok()
    }

    /// Equal-tempered frequency in Hz, A4 = 440
    pub fn frequency(self) -> f32 {
        440.0 * 2f32.powf((self.0 as f32 - 69.0) / 12.0)
    }

    /// Sharp-spelled name, e.g. `C#4`
    pub fn name(self) -> String {
        let octave = (self.0 as i32) / 12 - 1;
        format!("{}{}", SHARP_NAMES[(self.0 % 12) as usize], octave)
    }

    /// Pitch class name without octave, e.g. `F#`
    pub fn class_name(self) -> &'static str {
        SHARP_NAMES[(self.0 % 12) as usize]
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    /// Parse a letter, optional `#`/`b`, and octave (`C4`, `D#5`, `Bb3`, `C-1`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PitchError::BadName(s.to_string());
        let mut chars = s.trim().chars();
        let letter = chars.next().ok_or_else(bad)?;
        let base = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(bad()),
        };
        let rest: String = chars.collect();
        let (accidental, octave) = if let Some(o) = rest.strip_prefix('#') {
            (1, o)
        } else if let Some(o) = rest.strip_prefix('b') {
            (-1, o)
        } else {
            (0, rest.as_str())
        };
        let octave: i32 = octave.parse().map_err(|_| bad())?;
        Pitch::from_midi(12 * (octave + 1) + base + accidental)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("C4".parse::<Pitch>().unwrap().midi(), 60);
        assert_eq!("A4".parse::<Pitch>().unwrap().midi(), 69);
        assert_eq!("C#5".parse::<Pitch>().unwrap().midi(), 73);
        assert_eq!("Bb3".parse::<Pitch>().unwrap().midi(), 58);
        assert_eq!("c3".parse::<Pitch>().unwrap().midi(), 48);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("H4".parse::<Pitch>(), Err(PitchError::BadName(_))));
        assert!(matches!("C".parse::<Pitch>(), Err(PitchError::BadName(_))));
        assert_eq!("G9".parse::<Pitch>().unwrap().midi(), 127);
        assert!(matches!(
            "G#9".parse::<Pitch>(),
            Err(PitchError::OutOfRange(128))
        ));
    }

    #[test]
    fn test_name_uses_sharps() {
        let bb: Pitch = "Bb4".parse().unwrap();
        assert_eq!(bb.name(), "A#4");
        assert_eq!(Pitch::MIDDLE_C.name(), "C4");
        assert_eq!(bb.class_name(), "A#");
    }

    #[test]
    fn test_transpose() {
        assert_eq!(Pitch::MIDDLE_C.transpose(7).unwrap().name(), "G4");
        assert_eq!(Pitch::MIDDLE_C.transpose(-12).unwrap().name(), "C3");
        assert!(Pitch::from_midi(120).unwrap().transpose(10).is_none());
    }

    #[test]
    fn test_frequency() {
        let a4: Pitch = "A4".parse().unwrap();
        assert!((a4.frequency() - 440.0).abs() < 0.001);
        assert!((Pitch::MIDDLE_C.frequency() - 261.63).abs() < 0.01);
    }
}
