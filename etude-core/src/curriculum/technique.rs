//! Technique requirements: scales, chords and arpeggios per level, each
//! with the metronome tempo it should be played at

use super::{Level, Mode};
use crate::error::CurriculumError;
use crate::types::Pitch;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    Scales,
    Chords,
    Arpeggios,
}

impl FromStr for TechniqueKind {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scale" | "scales" => Ok(TechniqueKind::Scales),
            "chord" | "chords" => Ok(TechniqueKind::Chords),
            "arpeggio" | "arpeggios" | "arp" => Ok(TechniqueKind::Arpeggios),
            _ => Err(CurriculumError::Unknown {
                kind: "technique type",
                name: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TechniqueKind::Scales => "scale",
            TechniqueKind::Chords => "chord",
            TechniqueKind::Arpeggios => "arpeggio",
        };
        write!(f, "{}", name)
    }
}

/// How a technique chord is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordStyle {
    Broken,
    Solid,
}

impl fmt::Display for ChordStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordStyle::Broken => write!(f, "broken"),
            ChordStyle::Solid => write!(f, "solid"),
        }
    }
}

/// One requirement: an exercise, the keys it is played in, and its tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechniqueEntry {
    pub kind: TechniqueKind,
    pub name: &'static str,
    /// Only set for chords
    pub style: Option<ChordStyle>,
    pub keys: &'static [&'static str],
    pub tempo: u16,
}

const fn scale(name: &'static str, tempo: u16, keys: &'static [&'static str]) -> TechniqueEntry {
    TechniqueEntry {
        kind: TechniqueKind::Scales,
        name,
        style: None,
        keys,
        tempo,
    }
}

const fn chord(
    name: &'static str,
    style: ChordStyle,
    tempo: u16,
    keys: &'static [&'static str],
) -> TechniqueEntry {
    TechniqueEntry {
        kind: TechniqueKind::Chords,
        name,
        style: Some(style),
        keys,
        tempo,
    }
}

const fn arpeggio(name: &'static str, tempo: u16, keys: &'static [&'static str]) -> TechniqueEntry {
    TechniqueEntry {
        kind: TechniqueKind::Arpeggios,
        name,
        style: None,
        keys,
        tempo,
    }
}

static LEVEL_1: &[TechniqueEntry] = &[
    scale("Two-octave", 69, &[
        "C major", "G major", "F major", "A minor (natural)", "A minor (harmonic)",
        "E minor (natural)", "E minor (harmonic)", "D minor (natural)", "D minor (harmonic)",
    ]),
    scale("Contrary Motion", 69, &["C major"]),
    scale("Chromatic", 69, &["Starting on C"]),
    chord("Tonic Triads", ChordStyle::Broken, 50, &[
        "C major", "G major", "F major", "A minor", "E minor", "D minor",
    ]),
    chord("Tonic Triads", ChordStyle::Solid, 100, &[
        "C major", "G major", "F major", "A minor", "E minor", "D minor",
    ]),
];

static LEVEL_2: &[TechniqueEntry] = &[
    scale("Two-octave", 80, &[
        "G major", "F major", "Bb major", "E minor (harmonic)", "E minor (melodic)",
        "D minor (harmonic)", "D minor (melodic)", "G minor (harmonic)", "G minor (melodic)",
    ]),
    scale("Formula Pattern", 80, &["C major", "G major"]),
    scale("Chromatic", 80, &["Starting on G"]),
    chord("Tonic Triads", ChordStyle::Broken, 60, &[
        "G major", "F major", "Bb major", "E minor", "D minor", "G minor",
    ]),
    chord("Tonic Triads", ChordStyle::Solid, 112, &[
        "G major", "F major", "Bb major", "E minor", "D minor", "G minor",
    ]),
];

static LEVEL_3: &[TechniqueEntry] = &[
    scale("Two-octave", 80, &[
        "D major", "F major", "Bb major", "B minor (harmonic)", "B minor (melodic)",
        "D minor (harmonic)", "D minor (melodic)", "G minor (harmonic)", "G minor (melodic)",
    ]),
    scale("Formula Pattern", 80, &["D major"]),
    scale("Chromatic", 80, &["Starting on D"]),
    chord("Tonic Triads", ChordStyle::Broken, 69, &[
        "D major", "F major", "Bb major", "B minor", "D minor", "G minor",
    ]),
    chord("Tonic Triads", ChordStyle::Solid, 120, &[
        "D major", "F major", "Bb major", "B minor", "D minor", "G minor",
    ]),
];

static LEVEL_4: &[TechniqueEntry] = &[
    scale("Two-octave", 92, &[
        "D major", "A major", "Bb major", "Eb major", "B minor (harmonic)", "B minor (melodic)",
        "G minor (harmonic)", "G minor (melodic)", "C minor (harmonic)", "C minor (melodic)",
    ]),
    scale("Formula Pattern", 92, &["C minor (harmonic)"]),
    scale("Chromatic", 104, &["Starting on C"]),
    chord("Tonic Triads", ChordStyle::Broken, 60, &[
        "D major", "A major", "Bb major", "Eb major", "B minor", "G minor", "C minor",
    ]),
    chord("Tonic Triads", ChordStyle::Solid, 120, &[
        "D major", "A major", "Bb major", "Eb major", "B minor", "G minor", "C minor",
    ]),
    arpeggio("Tonic", 72, &[
        "D major", "A major", "Bb major", "Eb major", "B minor", "G minor", "C minor",
    ]),
];

static LEVEL_5: &[TechniqueEntry] = &[
    scale("Two-octave", 92, &[
        "A major", "E major", "F major", "Ab major", "A minor (harmonic)", "A minor (melodic)",
        "E minor (harmonic)", "E minor (melodic)", "F minor (harmonic)", "F minor (melodic)",
    ]),
    scale("Formula Pattern", 92, &["A major", "A minor (harmonic)"]),
    scale("Chromatic", 104, &["Starting on A", "Starting on F"]),
    chord("Tonic Triads", ChordStyle::Broken, 60, &[
        "A major", "E major", "F major", "Ab major", "A minor", "E minor", "F minor",
    ]),
    chord("Tonic Triads", ChordStyle::Solid, 120, &[
        "A major", "E major", "F major", "Ab major", "A minor", "E minor", "F minor",
    ]),
    arpeggio("Tonic", 72, &[
        "A major", "E major", "F major", "Ab major", "A minor", "E minor", "F minor",
    ]),
];

static LEVEL_6: &[TechniqueEntry] = &[
    scale("Two-octave", 60, &[
        "G major", "E major", "B major", "Db major", "G minor (harmonic)", "G minor (melodic)",
        "E minor (harmonic)", "B minor (harmonic)", "C# minor (harmonic)", "C# minor (melodic)",
    ]),
    scale("Formula Pattern", 60, &["E major", "E minor (harmonic)"]),
    scale("Chromatic", 60, &["Starting on E", "Starting on Db"]),
    chord("Tonic Triads", ChordStyle::Broken, 80, &["G major", "E major", "B major", "Db major"]),
    chord("Tonic Triads", ChordStyle::Solid, 80, &[
        "G major", "E major", "B major", "Db major", "G minor", "E minor", "B minor", "C# minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Broken, 88, &[
        "G major", "E major", "B major", "Db major",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Solid, 72, &[
        "G major", "E major", "B major", "Db major",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Broken, 88, &[
        "G major", "E major", "B major", "C# minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Solid, 72, &[
        "G major", "E major", "B major", "C# minor",
    ]),
    arpeggio("Tonic", 92, &[
        "G major", "E major", "B major", "Db major", "G minor", "E minor", "B minor", "C# minor",
    ]),
    arpeggio("Dominant 7th", 92, &["G major", "E major", "B major", "Db major"]),
    arpeggio("Leading-tone Diminished 7th", 92, &["G minor", "E minor", "B minor", "C# minor"]),
];

static LEVEL_7: &[TechniqueEntry] = &[
    scale("Two-octave", 76, &[
        "C major", "D major", "F major", "Ab major", "Gb major", "C minor (harmonic)",
        "D minor (harmonic)", "F minor (harmonic)", "G# minor (harmonic)", "F# minor (harmonic)",
        "C minor (melodic)", "D minor (melodic)", "F minor (melodic)", "G# minor (melodic)",
        "F# minor (melodic)",
    ]),
    scale("Formula Pattern", 76, &["D major", "D minor (harmonic)"]),
    scale("Chromatic", 76, &["Starting on D", "Starting on Gb"]),
    chord("Tonic Four-Note", ChordStyle::Broken, 60, &[
        "C major", "D major", "F major", "Ab major", "Gb major", "C minor", "D minor", "F minor",
        "G# minor", "F# minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Broken, 60, &[
        "C major", "D major", "F major", "Ab major", "Gb major",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Solid, 80, &[
        "C major", "D major", "F major", "Ab major", "Gb major",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Broken, 60, &[
        "C minor", "D minor", "F minor", "G# minor", "F# minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Solid, 80, &[
        "C minor", "D minor", "F minor", "G# minor", "F# minor",
    ]),
    arpeggio("Tonic", 60, &[
        "C major", "D major", "F major", "Ab major", "Gb major", "C minor", "D minor", "F minor",
        "G# minor", "F# minor",
    ]),
    arpeggio("Dominant 7th", 60, &["C major", "D major", "F major", "Ab major", "Gb major"]),
    arpeggio("Leading-tone Diminished 7th", 60, &[
        "C minor", "D minor", "F minor", "G# minor", "F# minor",
    ]),
];

static LEVEL_8: &[TechniqueEntry] = &[
    scale("Four-octave", 88, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major", "C minor (harmonic)",
        "C minor (melodic)", "D minor (harmonic)", "D minor (melodic)", "E minor (harmonic)",
        "E minor (melodic)", "Bb minor (harmonic)", "Bb minor (melodic)", "Eb minor (harmonic)",
        "Eb minor (melodic)", "F# minor (harmonic)", "F# minor (melodic)",
    ]),
    scale("Formula Pattern", 88, &["Eb major", "Eb minor (harmonic)"]),
    scale("Chromatic", 88, &["Starting on Eb", "Starting on E"]),
    chord("Tonic Four-Note", ChordStyle::Broken, 80, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major", "C minor", "D minor",
        "E minor", "Bb minor", "Eb minor", "F# minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Broken, 80, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Solid, 100, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Broken, 80, &[
        "C minor", "D minor", "E minor", "Bb minor", "Eb minor", "F# minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Solid, 100, &[
        "C minor", "D minor", "E minor", "Bb minor", "Eb minor", "F# minor",
    ]),
    arpeggio("Tonic", 69, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major", "C minor", "D minor",
        "E minor", "Bb minor", "Eb minor", "F# minor",
    ]),
    arpeggio("Dominant 7th", 69, &[
        "C major", "D major", "E major", "Bb major", "Eb major", "Gb major",
    ]),
    arpeggio("Leading-tone Diminished 7th", 69, &[
        "C minor", "D minor", "E minor", "Bb minor", "Eb minor", "F# minor",
    ]),
];

static LEVEL_9: &[TechniqueEntry] = &[
    scale("Four-octave", 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor (harmonic)",
        "C minor (melodic)", "Db minor (harmonic)", "Db minor (melodic)", "D minor (harmonic)",
        "D minor (melodic)", "Eb minor (harmonic)", "Eb minor (melodic)", "E minor (harmonic)",
        "E minor (melodic)", "F minor (harmonic)", "F minor (melodic)",
    ]),
    scale("Formula Pattern", 104, &[
        "F major", "Db major", "F minor (harmonic)", "C# minor (harmonic)",
    ]),
    scale("Chromatic", 104, &["C major", "Db major", "D major", "Eb major", "E major", "F major"]),
    scale("In Octaves (solid/blocked staccato)", 60, &[
        "F major", "Db major", "F minor (harmonic)", "C# minor (harmonic)",
    ]),
    scale("In Octaves (broken legato)", 72, &[
        "F major", "Db major", "F minor (harmonic)", "C# minor (harmonic)",
    ]),
    chord("Tonic Four-Note", ChordStyle::Broken, 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Tonic Four-Note", ChordStyle::Solid, 80, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Tonic Four-Note (broken alternate-note pattern)", ChordStyle::Broken, 80, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Broken, 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Solid, 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Broken, 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Solid, 104, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    arpeggio("Tonic", 84, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    arpeggio("Dominant 7th", 84, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
    arpeggio("Leading-tone Diminished 7th", 84, &[
        "C major", "Db major", "D major", "Eb major", "E major", "F major", "C minor", "C# minor",
        "D minor", "Eb minor", "E minor", "F minor",
    ]),
];

static LEVEL_10: &[TechniqueEntry] = &[
    scale("Four-octave", 120, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major",
        "F# minor (harmonic)", "F# minor (melodic)", "G minor (harmonic)", "G minor (melodic)",
        "G# minor (harmonic)", "G# minor (melodic)", "A minor (harmonic)", "A minor (melodic)",
        "Bb minor (harmonic)", "Bb minor (melodic)", "B minor (harmonic)", "B minor (melodic)",
    ]),
    scale("Separated by a 3rd", 104, &["Gb major", "G major", "Ab major"]),
    scale("Separated by a 6th", 104, &["A major", "Bb major", "B major"]),
    scale("In Octaves", 80, &["Bb", "Bb minor", "B", "B minor"]),
    scale("Chromatic in Octaves", 80, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major",
    ]),
    chord("Tonic Four-Note", ChordStyle::Broken, 96, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major", "F# minor",
        "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
    chord("Tonic Four-Note", ChordStyle::Solid, 120, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major", "F# minor",
        "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Broken, 96, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major",
    ]),
    chord("Dominant 7th Chords", ChordStyle::Solid, 120, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Broken, 96, &[
        "F# minor", "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
    chord("Leading-tone Diminished 7th Chords", ChordStyle::Solid, 120, &[
        "F# minor", "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
    arpeggio("Tonic", 92, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major", "F# minor",
        "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
    arpeggio("Dominant 7th", 92, &[
        "Gb major", "G major", "Ab major", "A major", "Bb major", "B major",
    ]),
    arpeggio("Leading-tone Diminished 7th", 92, &[
        "F# minor", "G minor", "G# minor", "A minor", "Bb minor", "B minor",
    ]),
];
/// Technique requirements at `level`
pub fn level_technique(level: Level) -> &'static [TechniqueEntry] {
    match level.number() {
        1 => LEVEL_1,
        2 => LEVEL_2,
        3 => LEVEL_3,
        4 => LEVEL_4,
        5 => LEVEL_5,
        6 => LEVEL_6,
        7 => LEVEL_7,
        8 => LEVEL_8,
        9 => LEVEL_9,
        _ => LEVEL_10,
    }
}

/// Pitch class (0 = C) a key such as `Bb minor (harmonic)` or
/// `Starting on D` is built on
pub fn key_root(key: &str) -> Option<u8> {
    let key = key.strip_prefix("Starting on ").unwrap_or(key);
    let root = key.split_whitespace().next()?;
    let pitch: Pitch = format!("{root}4").parse().ok()?;
    Some(pitch.midi() % 12)
}

/// `None` for keys that name only a starting note
pub fn key_mode(key: &str) -> Option<Mode> {
    if key.contains("minor") {
        Some(Mode::Minor)
    } else if key.contains("major") {
        Some(Mode::Major)
    } else {
        None
    }
}

/// Narrows which exercises can be drawn. Unset fields allow anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub kind: Option<TechniqueKind>,
    /// Pitch class of the key; enharmonic spellings match
    pub root: Option<u8>,
    pub mode: Option<Mode>,
    /// Only restricts chords
    pub style: Option<ChordStyle>,
    /// Draw arpeggio inversions instead of always root position
    pub inversions: bool,
}

impl ExerciseFilter {
    fn accepts_entry(&self, entry: &TechniqueEntry) -> bool {
        self.kind.map_or(true, |k| entry.kind == k)
            && match (self.style, entry.style) {
                (Some(wanted), Some(style)) => wanted == style,
                _ => true,
            }
    }

    fn accepts_key(&self, key: &str) -> bool {
        if self.root.is_none() && self.mode.is_none() {
            return true;
        }
        let Some(mode) = key_mode(key) else {
            return false;
        };
        self.mode.map_or(true, |m| m == mode)
            && self.root.map_or(true, |r| key_root(key) == Some(r))
    }
}

/// A drawn exercise, ready to practise against the metronome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub kind: TechniqueKind,
    pub name: &'static str,
    pub key: &'static str,
    pub tempo: u16,
    pub style: Option<ChordStyle>,
    /// Only set for arpeggios
    pub inversion: Option<&'static str>,
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}", self.kind, self.name, self.key)?;
        if let Some(style) = self.style {
            write!(f, ", {style}")?;
        }
        if let Some(inversion) = self.inversion {
            write!(f, ", {inversion}")?;
        }
        write!(f, " at {} BPM", self.tempo)
    }
}

const INVERSIONS: [&str; 4] = [
    "Root position",
    "1st inversion",
    "2nd inversion",
    "3rd inversion",
];

/// Pick a random exercise at `level`: first a technique type, then one of
/// its requirements, then a key
pub fn draw_exercise<R: Rng + ?Sized>(
    rng: &mut R,
    level: Level,
    filter: &ExerciseFilter,
) -> Result<Exercise, CurriculumError> {
    let candidates: Vec<(&TechniqueEntry, Vec<&'static str>)> = level_technique(level)
        .iter()
        .filter(|entry| filter.accepts_entry(entry))
        .filter_map(|entry| {
            let keys: Vec<&'static str> = entry
                .keys
                .iter()
                .copied()
                .filter(|key| filter.accepts_key(key))
                .collect();
            (!keys.is_empty()).then_some((entry, keys))
        })
        .collect();

    let mut kinds: Vec<TechniqueKind> = candidates.iter().map(|(e, _)| e.kind).collect();
    kinds.dedup();
    let empty = || CurriculumError::Empty(format!("technique matching that choice at {level}"));
    let kind = *kinds.choose(rng).ok_or_else(empty)?;

    let of_kind: Vec<_> = candidates.iter().filter(|(e, _)| e.kind == kind).collect();
    let (entry, keys) = of_kind.choose(rng).ok_or_else(empty)?;
    let key = *keys.choose(rng).ok_or_else(empty)?;

    let inversion = (kind == TechniqueKind::Arpeggios).then(|| {
        let count = if entry.name.contains("7th") { 4 } else { 3 };
        if filter.inversions {
            INVERSIONS[..count].choose(rng).copied().unwrap_or(INVERSIONS[0])
        } else {
            INVERSIONS[0]
        }
    });

    Ok(Exercise {
        kind,
        name: entry.name,
        key,
        tempo: entry.tempo,
        style: entry.style,
        inversion,
    })
}

/// [`draw_exercise`] with the thread's random generator
pub fn random_exercise(level: Level, filter: &ExerciseFilter) -> Result<Exercise, CurriculumError> {
    draw_exercise(&mut rand::thread_rng(), level, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn test_every_level_has_scales_and_chords() {
        for level in Level::all() {
            let entries = level_technique(level);
            assert!(entries.iter().any(|e| e.kind == TechniqueKind::Scales));
            assert!(entries.iter().any(|e| e.kind == TechniqueKind::Chords));
            assert!(entries.iter().all(|e| !e.keys.is_empty()));
            assert!(entries.iter().all(|e| (40..=200).contains(&e.tempo)));
        }
        // arpeggios begin at level 4
        assert!(level_technique(level(3))
            .iter()
            .all(|e| e.kind != TechniqueKind::Arpeggios));
    }

    #[test]
    fn test_key_parts() {
        assert_eq!(key_root("Bb minor (harmonic)"), Some(10));
        assert_eq!(key_root("Starting on D"), Some(2));
        assert_eq!(key_root("Gb major"), key_root("F# minor"));
        assert_eq!(key_mode("C# minor (melodic)"), Some(Mode::Minor));
        assert_eq!(key_mode("Starting on C"), None);
    }

    #[test]
    fn test_draw_respects_filter() {
        let mut rng = StdRng::seed_from_u64(3);
        let filter = ExerciseFilter {
            kind: Some(TechniqueKind::Chords),
            root: key_root("F#"),
            mode: Some(Mode::Minor),
            style: Some(ChordStyle::Solid),
            inversions: false,
        };
        for _ in 0..50 {
            let exercise = draw_exercise(&mut rng, level(10), &filter).unwrap();
            assert_eq!(exercise.kind, TechniqueKind::Chords);
            assert_eq!(exercise.key, "F# minor");
            assert_eq!(exercise.style, Some(ChordStyle::Solid));
            assert!(exercise.tempo == 120);
            assert_eq!(exercise.inversion, None);
        }
    }

    #[test]
    fn test_arpeggio_inversions() {
        let mut rng = StdRng::seed_from_u64(8);
        let root_only = ExerciseFilter {
            kind: Some(TechniqueKind::Arpeggios),
            ..Default::default()
        };
        let exercise = draw_exercise(&mut rng, level(6), &root_only).unwrap();
        assert_eq!(exercise.inversion, Some("Root position"));
        assert_eq!(exercise.tempo, 92);

        let all = ExerciseFilter {
            inversions: true,
            ..root_only
        };
        for _ in 0..50 {
            let exercise = draw_exercise(&mut rng, level(6), &all).unwrap();
            let inversion = exercise.inversion.unwrap();
            if !exercise.name.contains("7th") {
                assert_ne!(inversion, "3rd inversion");
            }
        }
    }

    #[test]
    fn test_nothing_to_draw() {
        let mut rng = StdRng::seed_from_u64(1);
        let filter = ExerciseFilter {
            kind: Some(TechniqueKind::Arpeggios),
            ..Default::default()
        };
        assert!(matches!(
            draw_exercise(&mut rng, level(1), &filter),
            Err(CurriculumError::Empty(_))
        ));
    }

    #[test]
    fn test_display() {
        let exercise = Exercise {
            kind: TechniqueKind::Chords,
            name: "Dominant 7th Chords",
            key: "G major",
            tempo: 88,
            style: Some(ChordStyle::Broken),
            inversion: None,
        };
        assert_eq!(
            exercise.to_string(),
            "chord: Dominant 7th Chords, G major, broken at 88 BPM"
        );
    }
}
