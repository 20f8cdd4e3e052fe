//! Error types for playback, clocks and script construction

use thiserror::Error;

/// Reading a clock that cannot answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("audio clock has been closed")]
    Closed,
    #[error("audio clock unavailable: {0}")]
    Unavailable(String),
}

/// Faults surfaced to whoever asked for playback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The voice has not finished loading its sound assets
    #[error("sounds are still loading, try again in a moment")]
    NotReady,
    #[error("audio clock unavailable: {0}")]
    ClockUnavailable(#[from] ClockError),
    /// The audio backend could not open an output
    #[error("audio backend error: {0}")]
    Backend(String),
    /// The controller was torn down and cannot play again
    #[error("playback controller has been torn down")]
    TornDown,
}

/// Building a fixed script from curriculum data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("note {root} + {semitones} semitones is outside the MIDI range")]
    PitchOutOfRange { root: u8, semitones: i32 },
    #[error("script has no notes")]
    Empty,
    #[error("note {index} has a non-positive duration")]
    NonPositiveDuration { index: usize },
}

/// Inconsistent scheduler configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lookahead ({lookahead_ms} ms) must be longer than the tick period ({tick_ms} ms)")]
    LookaheadTooShort { lookahead_ms: u128, tick_ms: u128 },
    #[error("tick period must be non-zero")]
    ZeroTick,
    #[error("a bar needs at least one beat")]
    EmptyBar,
    #[error("start offset must be a finite, non-negative number of seconds")]
    BadStartOffset,
}

/// Looking up curriculum items
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurriculumError {
    #[error("unknown {kind} '{name}'")]
    Unknown { kind: &'static str, name: String },
    #[error("no items available for {0}")]
    Empty(String),
    #[error("unknown level '{0}' (use 1-10)")]
    UnknownLevel(String),
    #[error("no question has been asked yet")]
    NoQuestion,
    #[error("no replays left for this question")]
    NoReplaysLeft,
    #[error(transparent)]
    Script(#[from] ScriptError),
}
