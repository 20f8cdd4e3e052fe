//! Graded curriculum: intervals, chords, progressions, melodies and
//! technique requirements
//!
//! Content follows the RCM (Royal Conservatory of Music) ear-training levels
//! 1-10. Tables are static; lookups by name return `CurriculumError` for
//! anything unknown.

pub mod chords;
pub mod intervals;
pub mod melodies;
pub mod progressions;
pub mod technique;

pub use chords::{ChordGroup, ChordShape};
pub use intervals::Interval;
pub use melodies::MelodyItem;
pub use progressions::ProgressionChord;
pub use technique::{Exercise, TechniqueKind};

use crate::error::CurriculumError;
use crate::types::Pitch;
use std::fmt;
use std::str::FromStr;

/// Lowest note used for generated questions (C3)
pub const LOWEST_NOTE: u8 = 48;
/// Highest note used for generated questions (C6)
pub const HIGHEST_NOTE: u8 = 84;

/// The recorded piano samples, by note name and file stem. Every minor
/// third from C3 to C6; other pitches are shifted from the nearest one.
pub const SAMPLED_NOTES: [(&str, &str); 13] = [
    ("C3", "C3v10"),
    ("D#3", "Ds3v10"),
    ("F#3", "Fs3v10"),
    ("A3", "A3v10"),
    ("C4", "C4v10"),
    ("D#4", "Ds4v10"),
    ("F#4", "Fs4v10"),
    ("A4", "A4v10"),
    ("C5", "C5v10"),
    ("D#5", "Ds5v10"),
    ("F#5", "Fs5v10"),
    ("A5", "A5v10"),
    ("C6", "C6v10"),
];

/// Pitches that have a recorded sample, ascending
pub fn sampled_pitches() -> Vec<Pitch> {
    SAMPLED_NOTES
        .iter()
        .filter_map(|(name, _)| name.parse().ok())
        .collect()
}

/// An RCM level, 1 to 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(10);

    pub fn new(number: u8) -> Result<Self, CurriculumError> {
        if (1..=10).contains(&number) {
            Ok(Level(number))
        } else {
            Err(CurriculumError::UnknownLevel(number.to_string()))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (1..=10).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::LAST
    }
}

impl FromStr for Level {
    type Err = CurriculumError;

    /// Accepts `5`, `L5`, `rcm5` or `level5`, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = ["level", "rcm", "l"]
            .iter()
            .find_map(|prefix| lower.strip_prefix(prefix))
            .unwrap_or(&lower)
            .trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(|n| Level::new(n).ok())
            .ok_or_else(|| CurriculumError::UnknownLevel(s.trim().to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RCM Level {}", self.0)
    }
}

/// Key quality of a progression or melody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Semitones from the tonic to the third of the tonic triad
    pub fn third(self) -> i32 {
        match self {
            Mode::Major => 4,
            Mode::Minor => 3,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => write!(f, "major"),
            Mode::Minor => write!(f, "minor"),
        }
    }
}

impl FromStr for Mode {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(Mode::Major),
            "minor" | "min" => Ok(Mode::Minor),
            _ => Err(CurriculumError::Unknown {
                kind: "mode",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("5".parse::<Level>().unwrap().number(), 5);
        assert_eq!("L7".parse::<Level>().unwrap().number(), 7);
        assert_eq!("rcm10".parse::<Level>().unwrap().number(), 10);
        assert_eq!("Level 3".parse::<Level>().unwrap().number(), 3);
        assert!("11".parse::<Level>().is_err());
        assert!("0".parse::<Level>().is_err());
        assert!("hard".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::new(4).unwrap().to_string(), "RCM Level 4");
        assert_eq!(Level::all().count(), 10);
    }

    #[test]
    fn test_sampled_pitches_are_minor_thirds_apart() {
        let pitches = sampled_pitches();
        assert_eq!(pitches.len(), 13);
        assert_eq!(pitches[0].midi(), LOWEST_NOTE);
        assert_eq!(pitches[12].midi(), HIGHEST_NOTE);
        assert!(pitches.windows(2).all(|w| w[1].midi() - w[0].midi() == 3));
    }

    #[test]
    fn test_mode() {
        assert_eq!("Minor".parse::<Mode>().unwrap(), Mode::Minor);
        assert_eq!(Mode::Major.third(), 4);
        assert!("dorian".parse::<Mode>().is_err());
    }
}
