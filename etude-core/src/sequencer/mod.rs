//! Event sequencers
//!
//! A sequencer owns a cursor and answers one question: what sounds at the
//! next position, and how far away is the position after it. The scheduler
//! never looks inside the cursor; it only stamps events with its watermark.

pub mod metronome;
pub mod script;

pub use metronome::MetronomeSequencer;
pub use script::{
    ChordPlayback, FixedScript, IntervalPlayback, MelodyNote, ScriptBuilder, ScriptEntry,
    ScriptSequencer,
};

use crate::types::{AudioTime, ScheduledEvent, Tempo};

/// Result of asking a sequencer for its next position
#[derive(Debug, Clone, PartialEq)]
pub enum Pull {
    /// Events sharing the requested time, and the distance in seconds to the
    /// following position
    Events {
        events: Vec<ScheduledEvent>,
        period: f64,
    },
    /// Nothing more will ever be produced
    Exhausted,
}

/// Source of timed events for the lookahead scheduler.
///
/// `pull` must not block. The returned period is a pure function of the
/// sequencer state and the tempo passed in at call time.
pub trait Sequencer: Send {
    fn pull(&mut self, at: AudioTime, tempo: Tempo) -> Pull;

    /// Rewind the cursor to the first position
    fn restart(&mut self);

    /// Short human-readable label for logs and status lines
    fn describe(&self) -> String;
}

impl<S: Sequencer + ?Sized> Sequencer for Box<S> {
    fn pull(&mut self, at: AudioTime, tempo: Tempo) -> Pull {
        (**self).pull(at, tempo)
    }

    fn restart(&mut self) {
        (**self).restart()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
