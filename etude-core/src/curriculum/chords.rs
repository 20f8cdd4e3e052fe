//! Chord shapes with inversions, and the chords tested at each level

use super::Level;
use crate::error::CurriculumError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordGroup {
    Triad,
    FourNote,
    Seventh,
}

impl fmt::Display for ChordGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordGroup::Triad => write!(f, "Triads"),
            ChordGroup::FourNote => write!(f, "Four Note Chords"),
            ChordGroup::Seventh => write!(f, "Seventh Chords"),
        }
    }
}

/// A chord as semitone offsets above its root, lowest note first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordShape {
    pub name: &'static str,
    pub group: ChordGroup,
    pub offsets: &'static [i32],
}

impl ChordShape {
    /// Widest offset, used to keep the chord inside the playable range
    pub fn span(&self) -> i32 {
        self.offsets.iter().copied().max().unwrap_or(0)
    }
}

const fn triad(name: &'static str, offsets: &'static [i32]) -> ChordShape {
    ChordShape {
        name,
        group: ChordGroup::Triad,
        offsets,
    }
}

const fn four_note(name: &'static str, offsets: &'static [i32]) -> ChordShape {
    ChordShape {
        name,
        group: ChordGroup::FourNote,
        offsets,
    }
}

const fn seventh(name: &'static str, offsets: &'static [i32]) -> ChordShape {
    ChordShape {
        name,
        group: ChordGroup::Seventh,
        offsets,
    }
}

pub static TRIADS: [ChordShape; 12] = [
    triad("Major (Root)", &[0, 4, 7]),
    triad("Major (1st Inv)", &[4, 7, 12]),
    triad("Major (2nd Inv)", &[7, 12, 16]),
    triad("Minor (Root)", &[0, 3, 7]),
    triad("Minor (1st Inv)", &[3, 7, 12]),
    triad("Minor (2nd Inv)", &[7, 12, 15]),
    triad("Diminished (Root)", &[0, 3, 6]),
    triad("Diminished (1st Inv)", &[3, 6, 12]),
    triad("Diminished (2nd Inv)", &[6, 12, 15]),
    triad("Augmented (Root)", &[0, 4, 8]),
    triad("Augmented (1st Inv)", &[4, 8, 12]),
    triad("Augmented (2nd Inv)", &[8, 12, 16]),
];

pub static FOUR_NOTE_CHORDS: [ChordShape; 6] = [
    four_note("Major 4-note (Root)", &[0, 4, 7, 12]),
    four_note("Major 4-note (1st Inv)", &[4, 7, 12, 16]),
    four_note("Major 4-note (2nd Inv)", &[7, 12, 16, 19]),
    four_note("Minor 4-note (Root)", &[0, 3, 7, 12]),
    four_note("Minor 4-note (1st Inv)", &[3, 7, 12, 15]),
    four_note("Minor 4-note (2nd Inv)", &[7, 12, 15, 19]),
];

pub static SEVENTHS: [ChordShape; 20] = [
    seventh("Major-Major 7th (Root)", &[0, 4, 7, 11]),
    seventh("Major-Major 7th (1st Inv)", &[4, 7, 11, 12]),
    seventh("Major-Major 7th (2nd Inv)", &[7, 11, 12, 16]),
    seventh("Major-Major 7th (3rd Inv)", &[11, 12, 16, 19]),
    seventh("Dominant 7th (Root)", &[0, 4, 7, 10]),
    seventh("Dominant 7th (1st Inv)", &[4, 7, 10, 12]),
    seventh("Dominant 7th (2nd Inv)", &[7, 10, 12, 14]),
    seventh("Dominant 7th (3rd Inv)", &[10, 12, 14, 17]),
    seventh("Minor-Minor 7th (Root)", &[0, 3, 7, 10]),
    seventh("Minor-Minor 7th (1st Inv)", &[3, 7, 10, 12]),
    seventh("Minor-Minor 7th (2nd Inv)", &[7, 10, 12, 15]),
    seventh("Minor-Minor 7th (3rd Inv)", &[10, 12, 15, 19]),
    seventh("Minor-Major 7th (Root)", &[0, 3, 7, 11]),
    seventh("Minor-Major 7th (1st Inv)", &[3, 7, 11, 12]),
    seventh("Minor-Major 7th (2nd Inv)", &[7, 11, 12, 15]),
    seventh("Minor-Major 7th (3rd Inv)", &[11, 12, 15, 19]),
    seventh("Diminished 7th (Root)", &[0, 3, 6, 9]),
    seventh("Diminished 7th (1st Inv)", &[3, 6, 9, 12]),
    seventh("Diminished 7th (2nd Inv)", &[6, 9, 12, 15]),
    seventh("Diminished 7th (3rd Inv)", &[9, 12, 15, 18]),
];

/// Every chord shape, triads first
pub fn all_chords() -> impl Iterator<Item = &'static ChordShape> {
    TRIADS.iter().chain(FOUR_NOTE_CHORDS.iter()).chain(SEVENTHS.iter())
}

/// Find a chord by name, ignoring case
pub fn chord_named(name: &str) -> Result<&'static ChordShape, CurriculumError> {
    let name = name.trim();
    all_chords()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CurriculumError::Unknown {
            kind: "chord",
            name: name.to_string(),
        })
}

const MAJOR_MINOR: &[&str] = &["Major (Root)", "Minor (Root)"];

/// Chords tested at `level`
pub fn level_chords(level: Level) -> Vec<&'static ChordShape> {
    let names: &[&str] = match level.number() {
        1..=4 => MAJOR_MINOR,
        5 => &["Major (Root)", "Minor (Root)", "Dominant 7th (Root)"],
        6 => &[
            "Major (Root)",
            "Minor (Root)",
            "Dominant 7th (Root)",
            "Diminished 7th (Root)",
        ],
        7 | 8 => &[
            "Major (Root)",
            "Minor (Root)",
            "Augmented (Root)",
            "Dominant 7th (Root)",
            "Diminished 7th (Root)",
        ],
        9 => &[
            "Major 4-note (Root)",
            "Major 4-note (1st Inv)",
            "Minor 4-note (Root)",
            "Minor 4-note (1st Inv)",
            "Augmented (Root)",
            "Dominant 7th (Root)",
            "Diminished 7th (Root)",
        ],
        _ => &[
            "Major 4-note (Root)",
            "Major 4-note (1st Inv)",
            "Minor 4-note (Root)",
            "Minor 4-note (1st Inv)",
            "Augmented (Root)",
            "Diminished 7th (Root)",
            "Dominant 7th (Root)",
            "Minor-Minor 7th (Root)",
            "Major-Major 7th (Root)",
        ],
    };
    names
        .iter()
        .filter_map(|name| chord_named(name).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(all_chords().count(), 38);
        assert!(TRIADS.iter().all(|c| c.offsets.len() == 3));
        assert!(SEVENTHS.iter().all(|c| c.offsets.len() == 4));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let chord = chord_named("dominant 7th (root)").unwrap();
        assert_eq!(chord.offsets, &[0, 4, 7, 10]);
        assert_eq!(chord.group, ChordGroup::Seventh);
        assert!(chord_named("Neapolitan 6th").is_err());
    }

    #[test]
    fn test_every_level_resolves_all_names() {
        assert_eq!(level_chords(Level::FIRST).len(), 2);
        assert_eq!(level_chords(Level::new(6).unwrap()).len(), 4);
        assert_eq!(level_chords(Level::new(9).unwrap()).len(), 7);
        assert_eq!(level_chords(Level::LAST).len(), 9);
    }

    #[test]
    fn test_span() {
        assert_eq!(chord_named("Major (2nd Inv)").unwrap().span(), 16);
    }
}
