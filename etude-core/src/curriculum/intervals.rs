//! Intervals and the intervals tested at each level

use super::Level;
use crate::error::CurriculumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub name: &'static str,
    /// Conventional abbreviation, accepted as an answer
    pub short: &'static str,
    pub semitones: i32,
}

const fn interval(name: &'static str, short: &'static str, semitones: i32) -> Interval {
    Interval {
        name,
        short,
        semitones,
    }
}

pub static INTERVALS: [Interval; 14] = [
    interval("Minor 2nd", "m2", 1),
    interval("Major 2nd", "M2", 2),
    interval("Minor 3rd", "m3", 3),
    interval("Major 3rd", "M3", 4),
    interval("Perfect 4th", "P4", 5),
    interval("Tritone", "TT", 6),
    interval("Perfect 5th", "P5", 7),
    interval("Minor 6th", "m6", 8),
    interval("Major 6th", "M6", 9),
    interval("Minor 7th", "m7", 10),
    interval("Major 7th", "M7", 11),
    interval("Perfect Octave", "P8", 12),
    interval("Minor 9th", "m9", 13),
    interval("Major 9th", "M9", 14),
];

/// Find an interval by full name (any case) or exact abbreviation
pub fn interval_named(name: &str) -> Result<&'static Interval, CurriculumError> {
    let name = name.trim();
    INTERVALS
        .iter()
        .find(|i| i.short == name || i.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CurriculumError::Unknown {
            kind: "interval",
            name: name.to_string(),
        })
}

/// Intervals tested at `level`
pub fn level_intervals(level: Level) -> Vec<&'static Interval> {
    let semitones: &[i32] = match level.number() {
        1 => &[3, 4],
        2 => &[3, 4, 7],
        3 => &[3, 4, 5, 7],
        4 => &[3, 4, 5, 7, 12],
        5 => &[3, 4, 5, 7, 8, 9, 12],
        6 => &[1, 2, 3, 4, 5, 7, 8, 9, 12],
        7 => &[1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12],
        8 | 9 => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        _ => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
    };
    INTERVALS
        .iter()
        .filter(|i| semitones.contains(&i.semitones))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(interval_named("perfect 5th").unwrap().semitones, 7);
        assert_eq!(interval_named("m3").unwrap().semitones, 3);
        assert_eq!(interval_named("M3").unwrap().semitones, 4);
        assert!(interval_named("augmented 11th").is_err());
    }

    #[test]
    fn test_levels_grow() {
        let one = level_intervals(Level::new(1).unwrap());
        assert_eq!(one.len(), 2);
        assert_eq!(level_intervals(Level::new(8).unwrap()).len(), 12);
        assert_eq!(level_intervals(Level::LAST).len(), 14);
        for n in 1..10 {
            let lower = level_intervals(Level::new(n).unwrap()).len();
            let upper = level_intervals(Level::new(n + 1).unwrap()).len();
            assert!(lower <= upper);
        }
    }
}
