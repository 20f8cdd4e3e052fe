//! Ear-training quizzes
//!
//! A `Trainer` draws questions from the curriculum for one quiz kind and
//! level, renders each one into a `FixedScript` for the playback controller,
//! and checks answers while keeping score.

use crate::curriculum::chords::{chord_named, level_chords};
use crate::curriculum::intervals::{interval_named, level_intervals};
use crate::curriculum::melodies::RCM10_MELODIES;
use crate::curriculum::progressions::{
    cadential_six_four, level_chord_set, level_mode, preset_progressions, progression_length,
    tonic, voicing, DOMINANT,
};
use crate::curriculum::{
    sampled_pitches, ChordShape, Interval, Level, MelodyItem, Mode, HIGHEST_NOTE, LOWEST_NOTE,
};
use crate::error::CurriculumError;
use crate::sequencer::{ChordPlayback, FixedScript, IntervalPlayback};
use crate::types::Pitch;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "colored")]
use colored::*;

/// Replays allowed after a melody's first hearing
pub const MELODY_REPLAYS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizKind {
    Interval,
    Chord,
    Progression,
    Melody,
}

impl FromStr for QuizKind {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interval" | "intervals" => Ok(QuizKind::Interval),
            "chord" | "chords" => Ok(QuizKind::Chord),
            "progression" | "progressions" | "prog" => Ok(QuizKind::Progression),
            "melody" | "melodies" => Ok(QuizKind::Melody),
            _ => Err(CurriculumError::Unknown {
                kind: "quiz",
                name: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizKind::Interval => "interval",
            QuizKind::Chord => "chord",
            QuizKind::Progression => "progression",
            QuizKind::Melody => "melody",
        };
        write!(f, "{}", name)
    }
}

/// Running tally of graded guesses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// The ground truth behind a question
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Interval(&'static Interval),
    Chord(&'static ChordShape),
    Progression {
        mode: Mode,
        symbols: Vec<&'static str>,
    },
    Melody(&'static MelodyItem),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Interval(interval) => write!(f, "{} ({})", interval.name, interval.short),
            Answer::Chord(chord) => write!(f, "{}", chord.name),
            Answer::Progression { mode, symbols } => {
                write!(f, "{} ({})", symbols.join(" - "), mode)
            }
            Answer::Melody(item) => {
                let notes: Vec<String> = item
                    .notes
                    .iter()
                    .map(|(name, beats)| format!("{name}:{beats}"))
                    .collect();
                write!(f, "{}", notes.join(" "))
            }
        }
    }
}

/// One drawn question
#[derive(Debug, Clone)]
pub struct Question {
    pub answer: Answer,
    /// Lowest note, or tonic for progressions and melodies
    pub root: Pitch,
    /// What to play first
    pub script: FixedScript,
    /// Short instruction for the student
    pub prompt: String,
    replay: FixedScript,
    replays_left: Option<u8>,
    /// One script per progression chord, played as each is reached
    chords: Vec<FixedScript>,
    progress: usize,
    mistake: bool,
    solved: bool,
}

impl Question {
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Replays remaining, `None` when unlimited
    pub fn replays_left(&self) -> Option<u8> {
        self.replays_left
    }

    /// Index of the progression chord to name next
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// The progression chord to name next, once the first has been named
    pub fn next_chord(&self) -> Option<&FixedScript> {
        if self.solved || self.progress == 0 {
            return None;
        }
        self.chords.get(self.progress)
    }
}

/// Result of checking a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    TryAgain,
    /// Progression chord named correctly, more to go
    Step { named: usize, of: usize },
    /// Melodies are written down, not typed
    Ungraded,
}

#[cfg(feature = "colored")]
impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "{}", "Correct!".bright_green().bold()),
            Feedback::TryAgain => write!(f, "{}", "Try again!".bright_red().bold()),
            Feedback::Step { named, of } => write!(
                f,
                "{} {}",
                "Correct!".bright_green(),
                format!("({named}/{of})").dimmed()
            ),
            Feedback::Ungraded => write!(f, "{}", "Compare with 'answer'".yellow()),
        }
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "Correct!"),
            Feedback::TryAgain => write!(f, "Try again!"),
            Feedback::Step { named, of } => write!(f, "Correct! ({named}/{of})"),
            Feedback::Ungraded => write!(f, "Compare with 'answer'"),
        }
    }
}

pub struct Trainer<R = StdRng> {
    rng: R,
    kind: QuizKind,
    level: Level,
    interval_playback: Vec<IntervalPlayback>,
    chord_playback: Vec<ChordPlayback>,
    score: Score,
    current: Option<Question>,
}

impl Trainer<StdRng> {
    pub fn new(kind: QuizKind, level: Level) -> Self {
        Self::with_rng(kind, level, StdRng::from_entropy())
    }
}

impl<R: Rng> Trainer<R> {
    pub fn with_rng(kind: QuizKind, level: Level, rng: R) -> Self {
        Self {
            rng,
            kind,
            level,
            interval_playback: vec![IntervalPlayback::Ascending],
            chord_playback: vec![ChordPlayback::Block],
            score: Score::default(),
            current: None,
        }
    }

    /// Interval playback orders to draw from. An empty list is ignored.
    pub fn with_interval_playback(mut self, modes: Vec<IntervalPlayback>) -> Self {
        self.set_interval_playback(modes);
        self
    }

    pub fn with_chord_playback(mut self, modes: Vec<ChordPlayback>) -> Self {
        self.set_chord_playback(modes);
        self
    }

    pub fn set_interval_playback(&mut self, modes: Vec<IntervalPlayback>) {
        if !modes.is_empty() {
            self.interval_playback = modes;
        }
    }

    pub fn set_chord_playback(&mut self, modes: Vec<ChordPlayback>) {
        if !modes.is_empty() {
            self.chord_playback = modes;
        }
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Draw a fresh question, replacing the current one
    pub fn next_question(&mut self) -> Result<&Question, CurriculumError> {
        let question = match self.kind {
            QuizKind::Interval => self.interval_question()?,
            QuizKind::Chord => self.chord_question()?,
            QuizKind::Progression => self.progression_question()?,
            QuizKind::Melody => self.melody_question()?,
        };
        debug!(kind = %self.kind, answer = %question.answer, "new question");
        Ok(self.current.insert(question))
    }

    /// Script for hearing the current question again
    pub fn replay(&mut self) -> Result<FixedScript, CurriculumError> {
        let question = self.current.as_mut().ok_or(CurriculumError::NoQuestion)?;
        if let Some(left) = question.replays_left.as_mut() {
            if *left == 0 {
                return Err(CurriculumError::NoReplaysLeft);
            }
            *left -= 1;
        }
        Ok(question.replay.clone())
    }

    /// Check an answer against the current question
    pub fn guess(&mut self, input: &str) -> Result<Feedback, CurriculumError> {
        let question = self.current.as_mut().ok_or(CurriculumError::NoQuestion)?;
        let feedback = match question.answer.clone() {
            Answer::Interval(expected) => {
                let correct = interval_named(input).map_or(false, |i| i == expected);
                grade(&mut self.score, question, correct)
            }
            Answer::Chord(expected) => {
                let correct = chord_named(input).map_or(false, |c| c == expected);
                grade(&mut self.score, question, correct)
            }
            Answer::Progression { symbols, .. } => {
                let mut feedback = if question.solved {
                    Feedback::Correct
                } else {
                    Feedback::TryAgain
                };
                for token in input.split(|c: char| c.is_whitespace() || c == ',' || c == '-') {
                    if token.is_empty() || question.solved {
                        continue;
                    }
                    if symbols.get(question.progress) != Some(&token) {
                        question.mistake = true;
                        feedback = Feedback::TryAgain;
                        break;
                    }
                    question.progress += 1;
                    if question.progress == symbols.len() {
                        // one result per progression, spoiled by any miss
                        self.score.record(!question.mistake);
                        question.solved = true;
                        feedback = Feedback::Correct;
                    } else {
                        feedback = Feedback::Step {
                            named: question.progress,
                            of: symbols.len(),
                        };
                    }
                }
                feedback
            }
            Answer::Melody(_) => Feedback::Ungraded,
        };
        Ok(feedback)
    }

    /// Give up on the current question and show its answer
    pub fn reveal(&mut self) -> Result<String, CurriculumError> {
        let question = self.current.as_mut().ok_or(CurriculumError::NoQuestion)?;
        question.solved = true;
        Ok(question.answer.to_string())
    }

    fn interval_question(&mut self) -> Result<Question, CurriculumError> {
        let interval = *level_intervals(self.level)
            .choose(&mut self.rng)
            .ok_or_else(|| CurriculumError::Empty(format!("intervals at {}", self.level)))?;
        let root = random_root(&mut self.rng, interval.semitones)?;
        let playback = *self
            .interval_playback
            .choose(&mut self.rng)
            .unwrap_or(&IntervalPlayback::Ascending);
        let script = FixedScript::interval(root, interval.semitones, playback)?;

        Ok(Question {
            answer: Answer::Interval(interval),
            root,
            replay: script.clone(),
            script,
            prompt: format!("Name the interval ({})", playback_name(playback)),
            replays_left: None,
            chords: Vec::new(),
            progress: 0,
            mistake: false,
            solved: false,
        })
    }

    fn chord_question(&mut self) -> Result<Question, CurriculumError> {
        let chord = *level_chords(self.level)
            .choose(&mut self.rng)
            .ok_or_else(|| CurriculumError::Empty(format!("chords at {}", self.level)))?;
        let root = chord_root(&mut self.rng, chord);
        let playback = *self
            .chord_playback
            .choose(&mut self.rng)
            .unwrap_or(&ChordPlayback::Block);
        let script = FixedScript::chord(root, chord.offsets, playback)?;

        Ok(Question {
            answer: Answer::Chord(chord),
            root,
            replay: script.clone(),
            script,
            prompt: format!("Name the chord ({})", playback_name(playback)),
            replays_left: None,
            chords: Vec::new(),
            progress: 0,
            mistake: false,
            solved: false,
        })
    }

    fn progression_question(&mut self) -> Result<Question, CurriculumError> {
        let mode = level_mode(self.level).unwrap_or_else(|| {
            if self.rng.gen_bool(0.5) {
                Mode::Major
            } else {
                Mode::Minor
            }
        });
        let symbols = generate_progression(&mut self.rng, self.level, mode)?;
        let tonic_pitch = Pitch::from_midi(LOWEST_NOTE as i32 + self.rng.gen_range(0..24))
            .unwrap_or(Pitch::MIDDLE_C);
        let voicings = symbols
            .iter()
            .map(|symbol| voicing(symbol, mode, tonic_pitch))
            .collect::<Result<Vec<_>, _>>()?;
        let script = FixedScript::progression(&voicings)?;
        let chords = voicings
            .iter()
            .zip(&symbols)
            .map(|(v, symbol)| {
                FixedScript::progression(std::slice::from_ref(v)).map(|s| s.with_label(*symbol))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Question {
            prompt: format!(
                "Name the {} chords, starting on the tonic ({} key)",
                symbols.len(),
                mode
            ),
            answer: Answer::Progression { mode, symbols },
            root: tonic_pitch,
            replay: script.clone(),
            script,
            replays_left: None,
            chords,
            progress: 0,
            mistake: false,
            solved: false,
        })
    }

    fn melody_question(&mut self) -> Result<Question, CurriculumError> {
        let item = RCM10_MELODIES
            .choose(&mut self.rng)
            .ok_or_else(|| CurriculumError::Empty("melodies".to_string()))?;

        Ok(Question {
            answer: Answer::Melody(item),
            root: item.tonic_pitch()?,
            script: item.script(true)?,
            replay: item.script(false)?,
            prompt: format!(
                "Write down the melody. Key: {}, time: {}, tempo: {}",
                item.key,
                item.time_signature,
                item.tempo()
            ),
            replays_left: Some(MELODY_REPLAYS),
            chords: Vec::new(),
            progress: 0,
            mistake: false,
            solved: false,
        })
    }
}

fn playback_name(mode: impl fmt::Debug) -> String {
    format!("{:?}", mode).to_lowercase()
}

fn grade(score: &mut Score, question: &mut Question, correct: bool) -> Feedback {
    score.record(correct);
    if correct {
        question.solved = true;
        Feedback::Correct
    } else {
        Feedback::TryAgain
    }
}

/// A root that keeps both notes of the interval inside C3..C6
pub fn random_root<R: Rng + ?Sized>(rng: &mut R, semitones: i32) -> Result<Pitch, CurriculumError> {
    let roots: Vec<i32> = (LOWEST_NOTE as i32..=HIGHEST_NOTE as i32)
        .filter(|midi| (LOWEST_NOTE as i32..=HIGHEST_NOTE as i32).contains(&(midi + semitones)))
        .collect();
    let midi = roots
        .choose(rng)
        .ok_or_else(|| CurriculumError::Empty(format!("roots for {semitones} semitones")))?;
    Ok(Pitch::from_midi(*midi).unwrap_or(Pitch::MIDDLE_C))
}

/// A sampled root low enough for the whole chord to stay below C6,
/// falling back to middle C
pub fn chord_root<R: Rng + ?Sized>(rng: &mut R, chord: &ChordShape) -> Pitch {
    let ceiling = HIGHEST_NOTE as i32 - chord.span();
    let roots: Vec<Pitch> = sampled_pitches()
        .into_iter()
        .filter(|p| (p.midi() as i32) <= ceiling)
        .collect();
    roots.choose(rng).copied().unwrap_or(Pitch::MIDDLE_C)
}

/// Pick a progression for `level` in `mode`.
///
/// Levels with preset progressions use one that fits the key. Otherwise a
/// random progression starts on the tonic and, when the cadential 6/4 is
/// available, ends on a cadence through it.
pub fn generate_progression<R: Rng + ?Sized>(
    rng: &mut R,
    level: Level,
    mode: Mode,
) -> Result<Vec<&'static str>, CurriculumError> {
    let chords = level_chord_set(level, mode);
    let tonic = tonic(mode);
    if !chords.contains(&tonic) || chords.len() < 2 {
        return Err(CurriculumError::Empty(format!(
            "{} progressions at {}",
            mode, level
        )));
    }

    let fitting: Vec<&'static [&'static str]> = preset_progressions(level)
        .iter()
        .copied()
        .filter(|p| p.iter().all(|symbol| chords.contains(symbol)))
        .collect();
    if let Some(preset) = fitting.choose(rng) {
        return Ok(preset.to_vec());
    }

    let length = progression_length(level);
    let cadence = cadential_six_four(mode);
    let available: Vec<&'static str> = chords
        .iter()
        .copied()
        .filter(|&c| c != tonic && c != cadence)
        .collect();
    let pool: &[&'static str] = if available.is_empty() {
        chords
    } else {
        &available
    };

    let mut progression = vec![tonic];
    let fill = |progression: &mut Vec<&'static str>, until: usize, rng: &mut R| {
        while progression.len() < until {
            if let Some(&chord) = pool.choose(rng) {
                progression.push(chord);
            }
        }
    };

    if chords.contains(&cadence) && length >= 3 {
        if length >= 4 && rng.gen_bool(0.5) {
            fill(&mut progression, length - 3, rng);
            progression.extend([cadence, DOMINANT, tonic]);
        } else {
            fill(&mut progression, length - 2, rng);
            progression.extend([cadence, DOMINANT]);
        }
    } else {
        fill(&mut progression, length, rng);
    }
    Ok(progression)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn test_interval_roots_stay_in_range() {
        let mut rng = rng(7);
        for _ in 0..200 {
            let root = random_root(&mut rng, 14).unwrap();
            assert!(root.midi() >= LOWEST_NOTE);
            assert!(root.midi() as i32 + 14 <= HIGHEST_NOTE as i32);
        }
    }

    #[test]
    fn test_chord_roots_are_sampled() {
        let mut rng = rng(3);
        let sampled = sampled_pitches();
        let chord = chord_named("Major 4-note (2nd Inv)").unwrap();
        for _ in 0..50 {
            let root = chord_root(&mut rng, chord);
            assert!(sampled.contains(&root));
            assert!(root.midi() as i32 + chord.span() <= HIGHEST_NOTE as i32);
        }
    }

    #[test]
    fn test_interval_quiz_scores() {
        let mut trainer = Trainer::with_rng(QuizKind::Interval, level(1), rng(1));
        let answer = match trainer.next_question().unwrap().answer.clone() {
            Answer::Interval(i) => i,
            other => panic!("unexpected answer {:?}", other),
        };
        let wrong = if answer.semitones == 3 { "M3" } else { "m3" };

        assert_eq!(trainer.guess(wrong).unwrap(), Feedback::TryAgain);
        assert_eq!(trainer.guess(answer.name).unwrap(), Feedback::Correct);
        assert_eq!(trainer.score(), Score { correct: 1, total: 2 });
        assert!(trainer.current().unwrap().is_solved());
    }

    #[test]
    fn test_guess_without_question() {
        let mut trainer = Trainer::with_rng(QuizKind::Chord, level(3), rng(1));
        assert_eq!(trainer.guess("Major (Root)"), Err(CurriculumError::NoQuestion));
        assert_eq!(trainer.replay().err(), Some(CurriculumError::NoQuestion));
    }

    #[test]
    fn test_chord_quiz_uses_block_by_default() {
        let mut trainer = Trainer::with_rng(QuizKind::Chord, level(5), rng(9));
        let question = trainer.next_question().unwrap();
        assert_eq!(question.script.entries().len(), 1);
    }

    #[test]
    fn test_progression_steps() {
        let mut trainer = Trainer::with_rng(QuizKind::Progression, level(5), rng(11));
        let symbols = match trainer.next_question().unwrap().answer.clone() {
            Answer::Progression { mode, symbols } => {
                assert_eq!(mode, Mode::Major);
                symbols
            }
            other => panic!("unexpected answer {:?}", other),
        };
        assert_eq!(symbols.len(), 3);
        assert_eq!(symbols[0], "I");

        assert_eq!(
            trainer.guess(symbols[0]).unwrap(),
            Feedback::Step { named: 1, of: 3 }
        );
        assert_eq!(trainer.guess("vi").unwrap(), Feedback::TryAgain);
        let rest = format!("{} {}", symbols[1], symbols[2]);
        assert_eq!(trainer.guess(&rest).unwrap(), Feedback::Correct);
        assert_eq!(trainer.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn test_clean_progression_scores_once() {
        let mut trainer = Trainer::with_rng(QuizKind::Progression, level(5), rng(11));
        let answer = trainer.next_question().unwrap().answer.clone();
        let Answer::Progression { symbols, .. } = answer else {
            panic!("not a progression");
        };
        for symbol in &symbols[..symbols.len() - 1] {
            assert!(matches!(trainer.guess(symbol).unwrap(), Feedback::Step { .. }));
        }
        assert_eq!(trainer.score(), Score::default());
        assert_eq!(trainer.guess(symbols[symbols.len() - 1]).unwrap(), Feedback::Correct);
        assert_eq!(trainer.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn test_next_chord_follows_progress() {
        let mut trainer = Trainer::with_rng(QuizKind::Progression, level(5), rng(11));
        let question = trainer.next_question().unwrap();
        assert!(question.next_chord().is_none());
        let Answer::Progression { symbols, .. } = question.answer.clone() else {
            panic!("not a progression");
        };
        let second = question.chords[1].clone();

        trainer.guess(symbols[0]).unwrap();
        let next = trainer.current().and_then(|q| q.next_chord()).unwrap();
        assert_eq!(next.label(), symbols[1]);
        assert_eq!(next.entries(), second.entries());
        assert_eq!(next.entries().len(), 1);

        trainer.guess(&symbols[1..].join(" ")).unwrap();
        assert!(trainer.current().and_then(|q| q.next_chord()).is_none());
    }

    #[test]
    fn test_progression_script_spacing() {
        let mut trainer = Trainer::with_rng(QuizKind::Progression, level(8), rng(5));
        let question = trainer.next_question().unwrap();
        assert_eq!(question.script.entries().len(), 4);
        assert!(question.script.entries().iter().all(|e| e.pitches.len() == 4));
    }

    #[test]
    fn test_random_progressions_end_in_cadence() {
        let mut rng = rng(21);
        for _ in 0..100 {
            let prog = generate_progression(&mut rng, level(10), Mode::Major).unwrap();
            assert_eq!(prog[0], "I");
            assert_eq!(prog.len(), 5);
            let tail = &prog[prog.len() - 2..];
            let full = &prog[prog.len() - 3..];
            assert!(tail == ["I6/4", "V"] || full == ["I6/4", "V", "I"]);
        }
    }

    #[test]
    fn test_random_progression_without_cadence() {
        let mut rng = rng(4);
        let prog = generate_progression(&mut rng, level(9), Mode::Minor).unwrap();
        assert_eq!(prog.len(), 5);
        assert_eq!(prog[0], "i");
        assert!(prog[1..].iter().all(|c| ["iv", "V", "VI"].contains(c)));
    }

    #[test]
    fn test_no_progressions_below_level_five() {
        let mut rng = rng(4);
        assert!(generate_progression(&mut rng, level(4), Mode::Major).is_err());
    }

    #[test]
    fn test_melody_replays_are_limited() {
        let mut trainer = Trainer::with_rng(QuizKind::Melody, level(10), rng(2));
        let question = trainer.next_question().unwrap();
        let first_len = question.script.entries().len();
        assert_eq!(question.replays_left(), Some(MELODY_REPLAYS));

        let replay = trainer.replay().unwrap();
        // replay skips the tonic triad
        assert_eq!(replay.entries().len(), first_len - 1);
        trainer.replay().unwrap();
        assert_eq!(trainer.replay().err(), Some(CurriculumError::NoReplaysLeft));
        assert_eq!(trainer.guess("anything").unwrap(), Feedback::Ungraded);
    }

    #[test]
    fn test_reveal_marks_solved() {
        let mut trainer = Trainer::with_rng(QuizKind::Chord, level(1), rng(8));
        trainer.next_question().unwrap();
        let answer = trainer.reveal().unwrap();
        assert!(answer.contains("(Root)"));
        assert!(trainer.current().unwrap().is_solved());
    }

    #[test]
    fn test_quiz_kind_parsing() {
        assert_eq!("Intervals".parse::<QuizKind>().unwrap(), QuizKind::Interval);
        assert_eq!("prog".parse::<QuizKind>().unwrap(), QuizKind::Progression);
        assert!("scales".parse::<QuizKind>().is_err());
    }
}
