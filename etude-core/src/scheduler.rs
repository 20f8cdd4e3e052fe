//! Lookahead scheduler
//!
//! The wake timer is coarse and late by an unknown amount, so nothing is
//! played "now". Each tick commits every event whose time falls inside
//! `[watermark, now + lookahead)` to the voice, stamped with its exact audio
//! time, and moves the watermark on by the sequencer's period. As long as no
//! tick arrives later than the lookahead window, timing is sample exact.

use crate::clock::ClockSource;
use crate::sequencer::{Pull, Sequencer};
use crate::types::{AudioTime, Tempo};
use crate::voice::Voice;
use tracing::{debug, trace, warn};

/// Upper bound on pulls in one tick, protects against a sequencer that
/// keeps answering with a zero period
const MAX_PULLS_PER_TICK: usize = 1024;

/// What one wake tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The clock could not be read; nothing was dispatched
    Skipped,
    Progress { dispatched: usize },
    /// The sequencer ran out. `ends_at` is the audio time at which the last
    /// dispatched material finishes sounding.
    Exhausted { dispatched: usize, ends_at: AudioTime },
}

/// One playback session: a sequencer plus the "next un-emitted time"
/// watermark. Mutated in place by tempo changes, never rewound.
pub struct SchedulerSession {
    sequencer: Box<dyn Sequencer>,
    next_event_time: AudioTime,
    exhausted: bool,
    dispatched: usize,
}

impl SchedulerSession {
    /// Start a session whose first event sounds at `start`
    pub fn begin(sequencer: Box<dyn Sequencer>, start: AudioTime) -> Self {
        debug!(start, sequencer = %sequencer.describe(), "scheduler session begins");
        Self {
            sequencer,
            next_event_time: start,
            exhausted: false,
            dispatched: 0,
        }
    }

    /// Time of the next event that has not been handed to the voice yet
    pub fn next_event_time(&self) -> AudioTime {
        self.next_event_time
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Events dispatched over the lifetime of the session
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn describe(&self) -> String {
        self.sequencer.describe()
    }

    /// Run one wake tick.
    ///
    /// `tempo` is the value current at the moment of the tick; it is passed
    /// to every pull so a tempo change only affects spacing from the next
    /// pull on.
    pub fn tick<C, V>(
        &mut self,
        clock: &C,
        tempo: Tempo,
        voice: &mut V,
        lookahead: f64,
    ) -> TickOutcome
    where
        C: ClockSource + ?Sized,
        V: Voice + ?Sized,
    {
        let now = match clock.now() {
            Ok(now) => now,
            Err(e) => {
                warn!("skipping scheduler tick: {}", e);
                return TickOutcome::Skipped;
            }
        };

        if self.exhausted {
            return TickOutcome::Exhausted {
                dispatched: 0,
                ends_at: self.next_event_time,
            };
        }

        let horizon = now + lookahead;
        let mut dispatched = 0;
        let mut pulls = 0;

        while self.next_event_time < horizon {
            if pulls == MAX_PULLS_PER_TICK {
                warn!(
                    pulls,
                    next = self.next_event_time,
                    "sequencer is not advancing, deferring to next tick"
                );
                break;
            }
            pulls += 1;

            match self.sequencer.pull(self.next_event_time, tempo) {
                Pull::Events { events, period } => {
                    for event in &events {
                        trace!(
                            at = event.target_time,
                            now,
                            kind = ?event.kind,
                            step = event.step,
                            "dispatch"
                        );
                        voice.play(event);
                    }
                    dispatched += events.len();
                    self.next_event_time += period;
                }
                Pull::Exhausted => {
                    self.exhausted = true;
                    self.dispatched += dispatched;
                    debug!(ends_at = self.next_event_time, "sequencer exhausted");
                    return TickOutcome::Exhausted {
                        dispatched,
                        ends_at: self.next_event_time,
                    };
                }
            }
        }

        self.dispatched += dispatched;
        TickOutcome::Progress { dispatched }
    }
}

impl std::fmt::Debug for SchedulerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerSession")
            .field("sequencer", &self.sequencer.describe())
            .field("next_event_time", &self.next_event_time)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sequencer::{FixedScript, IntervalPlayback, MetronomeSequencer, ScriptSequencer};
    use crate::types::Pitch;
    use crate::voice::EventLog;

    const LOOKAHEAD: f64 = 0.1;

    #[test]
    fn test_dispatches_inside_window_only() {
        let (clock, handle) = ManualClock::new(0.0);
        let mut voice = EventLog::new();
        let mut session = SchedulerSession::begin(Box::new(MetronomeSequencer::new(4)), 0.0);

        let outcome = session.tick(&clock, Tempo::new(60), &mut voice, LOOKAHEAD);
        assert_eq!(outcome, TickOutcome::Progress { dispatched: 1 });
        assert_eq!(session.next_event_time(), 1.0);

        handle.advance(0.5);
        session.tick(&clock, Tempo::new(60), &mut voice, LOOKAHEAD);
        assert_eq!(voice.len(), 1);

        handle.advance(0.45);
        session.tick(&clock, Tempo::new(60), &mut voice, LOOKAHEAD);
        assert_eq!(voice.beat_times(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_late_tick_catches_up_with_exact_times() {
        let (clock, handle) = ManualClock::new(0.0);
        let mut voice = EventLog::new();
        let mut session = SchedulerSession::begin(Box::new(MetronomeSequencer::new(4)), 0.0);

        // a stalled timer wakes up two seconds late
        handle.advance(2.0);
        session.tick(&clock, Tempo::new(120), &mut voice, LOOKAHEAD);
        assert_eq!(voice.beat_times(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_closed_clock_skips() {
        let (clock, handle) = ManualClock::new(0.0);
        handle.close();
        let mut voice = EventLog::new();
        let mut session = SchedulerSession::begin(Box::new(MetronomeSequencer::new(4)), 0.0);

        let outcome = session.tick(&clock, Tempo::default(), &mut voice, LOOKAHEAD);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(voice.is_empty());
        assert_eq!(session.next_event_time(), 0.0);
    }

    #[test]
    fn test_exhaustion_reports_end_time() {
        let (clock, handle) = ManualClock::new(10.0);
        let mut voice = EventLog::new();
        let script = FixedScript::interval(Pitch::MIDDLE_C, 7, IntervalPlayback::Ascending).unwrap();
        let mut session = SchedulerSession::begin(Box::new(ScriptSequencer::new(script)), 10.0);

        session.tick(&clock, Tempo::default(), &mut voice, LOOKAHEAD);
        assert_eq!(voice.len(), 1);

        handle.set(11.0);
        let outcome = session.tick(&clock, Tempo::default(), &mut voice, LOOKAHEAD);
        assert_eq!(outcome, TickOutcome::Progress { dispatched: 1 });

        handle.set(12.05);
        match session.tick(&clock, Tempo::default(), &mut voice, LOOKAHEAD) {
            TickOutcome::Exhausted { dispatched, ends_at } => {
                assert_eq!(dispatched, 0);
                assert!((ends_at - 12.1).abs() < 1e-9);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert!(session.is_exhausted());
        assert_eq!(session.dispatched(), 2);
    }
}
