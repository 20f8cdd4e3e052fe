//! Playback controller: start/stop/retempo lifecycle around one scheduler
//! session
//!
//! The controller is the only owner of the clock source, the wake timer and
//! the voice. It is driven from a single thread: user commands and timer
//! wake-ups both end up as method calls here, so tempo is always read at the
//! moment it is used and no locking is needed.

use crate::clock::{ClockProvider, ClockSource};
use crate::config::SchedulerConfig;
use crate::error::PlaybackError;
use crate::scheduler::{SchedulerSession, TickOutcome};
use crate::sequencer::{FixedScript, MetronomeSequencer, ScriptSequencer, Sequencer};
use crate::timer::WakeTimer;
use crate::types::{AudioTime, ScheduledEvent, Tempo};
use crate::voice::Voice;
use tracing::{debug, info};

/// What the controller plays when started
#[derive(Debug, Clone, PartialEq)]
pub enum Program {
    Metronome { beats_per_bar: u32 },
    Script(FixedScript),
}

impl Program {
    fn sequencer(&self) -> Box<dyn Sequencer> {
        match self {
            Program::Metronome { beats_per_bar } => {
                Box::new(MetronomeSequencer::new(*beats_per_bar))
            }
            Program::Script(script) => Box::new(ScriptSequencer::new(script.clone())),
        }
    }

    pub fn is_metronome(&self) -> bool {
        matches!(self, Program::Metronome { .. })
    }
}

/// Notifications for whoever displays playback state
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started,
    /// A click was committed to the voice. `index` is the beat within the bar.
    Beat { index: usize, at: AudioTime },
    TempoChanged(Tempo),
    Stopped,
    /// A fixed script ran out. Sent when the last entry is dispatched; the
    /// sound itself finishes at `ends_at`.
    Completed { ends_at: AudioTime },
}

type Listener = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Forwards to the real voice and remembers which clicks went out
struct BeatTap<'a, V: ?Sized> {
    voice: &'a mut V,
    beats: Vec<(usize, AudioTime)>,
}

impl<V: Voice + ?Sized> Voice for BeatTap<'_, V> {
    fn is_ready(&self) -> bool {
        self.voice.is_ready()
    }

    fn play(&mut self, event: &ScheduledEvent) {
        if event.is_beat() {
            self.beats.push((event.step, event.target_time));
        }
        self.voice.play(event);
    }
}

pub struct PlaybackController<P: ClockProvider, V: Voice, T: WakeTimer> {
    config: SchedulerConfig,
    provider: P,
    clock: Option<P::Clock>,
    voice: V,
    timer: T,
    tempo: Tempo,
    program: Program,
    session: Option<SchedulerSession>,
    current_beat: Option<usize>,
    listeners: Vec<Listener>,
    torn_down: bool,
}

impl<P: ClockProvider, V: Voice, T: WakeTimer> PlaybackController<P, V, T> {
    /// Create a stopped controller. No clock is acquired until the first
    /// `start()`. The configuration is expected to be validated already.
    pub fn new(config: SchedulerConfig, provider: P, voice: V, timer: T) -> Self {
        let tempo = config.default_tempo;
        let program = Program::Metronome {
            beats_per_bar: config.beats_per_bar,
        };
        Self {
            config,
            provider,
            clock: None,
            voice,
            timer,
            tempo,
            program,
            session: None,
            current_beat: None,
            listeners: Vec::new(),
            torn_down: false,
        }
    }

    /// Begin playing the loaded program. A no-op while already running.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.torn_down {
            return Err(PlaybackError::TornDown);
        }
        if self.session.is_some() {
            debug!("start ignored, already running");
            return Ok(());
        }
        if !self.voice.is_ready() {
            return Err(PlaybackError::NotReady);
        }

        // a clock closed underneath us (device lost) is replaced
        let clock = match self.clock.take().filter(|c| !c.is_closed()) {
            Some(clock) => clock,
            None => {
                debug!("acquiring audio clock");
                self.provider.acquire()?
            }
        };
        let now = clock.now();
        self.clock = Some(clock);
        let start = now? + self.config.start_offset;

        let session = SchedulerSession::begin(self.program.sequencer(), start);
        info!(tempo = %self.tempo, program = %session.describe(), "playback started");
        self.session = Some(session);
        self.current_beat = None;
        self.timer.arm(self.config.tick_period);
        self.emit(PlaybackEvent::Started);

        // first events go out immediately instead of one tick period late
        self.tick();
        Ok(())
    }

    /// Stop scheduling. Already dispatched sound plays out. A no-op while
    /// stopped.
    pub fn stop(&mut self) {
        self.timer.cancel();
        if self.session.take().is_some() {
            info!("playback stopped");
            self.emit(PlaybackEvent::Stopped);
        }
    }

    /// Start over from the first position of the program
    pub fn restart(&mut self) -> Result<(), PlaybackError> {
        self.stop();
        self.start()
    }

    /// Change the tempo, clamping into the configured range.
    ///
    /// A live session keeps its watermark and cursor; only the spacing of
    /// events pulled from now on changes.
    pub fn set_tempo(&mut self, bpm: i64) -> Tempo {
        let tempo = self.config.tempo_range.clamp(bpm);
        if tempo != self.tempo {
            debug!(from = %self.tempo, to = %tempo, "tempo change");
            self.tempo = tempo;
            self.emit(PlaybackEvent::TempoChanged(tempo));
        }
        tempo
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the voice has its sound assets loaded
    pub fn is_ready(&self) -> bool {
        self.voice.is_ready()
    }

    /// Beat within the bar of the most recently dispatched click
    pub fn current_beat_index(&self) -> Option<usize> {
        self.current_beat
    }

    /// Replace the program used by the next `start()`. A live session is
    /// left alone.
    pub fn load(&mut self, program: Program) {
        self.program = program;
    }

    /// Stop whatever is playing and start `program` from its beginning
    pub fn play(&mut self, program: Program) -> Result<(), PlaybackError> {
        self.stop();
        self.load(program);
        self.start()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Watermark of the live session
    pub fn next_event_time(&self) -> Option<AudioTime> {
        self.session.as_ref().map(SchedulerSession::next_event_time)
    }

    /// Label of what is currently playing
    pub fn describe(&self) -> Option<String> {
        self.session.as_ref().map(SchedulerSession::describe)
    }

    /// Handle one wake-up from the timer. Returns `None` when idle.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let session = self.session.as_mut()?;
        let Some(clock) = self.clock.as_ref() else {
            return Some(TickOutcome::Skipped);
        };

        let mut tap = BeatTap {
            voice: &mut self.voice,
            beats: Vec::new(),
        };
        let outcome = session.tick(clock, self.tempo, &mut tap, self.config.lookahead_secs());
        let beats = tap.beats;

        for (index, at) in beats {
            self.current_beat = Some(index);
            self.emit(PlaybackEvent::Beat { index, at });
        }

        if let TickOutcome::Exhausted { ends_at, .. } = outcome {
            self.timer.cancel();
            self.session = None;
            info!(ends_at, "playback complete");
            self.emit(PlaybackEvent::Completed { ends_at });
        }
        Some(outcome)
    }

    /// Stop and release the clock. Safe to call repeatedly; the clock is
    /// closed exactly once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.stop();
        if let Some(mut clock) = self.clock.take() {
            debug!("closing audio clock");
            clock.close();
        }
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Register a listener for playback notifications
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    pub fn voice_mut(&mut self) -> &mut V {
        &mut self.voice
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    fn emit(&mut self, event: PlaybackEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<P: ClockProvider, V: Voice, T: WakeTimer> Drop for PlaybackController<P, V, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
