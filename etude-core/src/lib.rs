//! # Etude Core
//!
//! Audio scheduling and ear-training logic for the Etude practice companion,
//! with no audio device dependencies.
//!
//! Playback is driven by a lookahead scheduler: a coarse wake timer fires
//! every few tens of milliseconds, and each tick commits the events that fall
//! inside a short window ahead of the audio clock to a [`Voice`], stamped with
//! their exact start times. Timer jitter then never reaches the sound.
//!
//! ## Features
//!
//! - **serde**: (de)serialisation of configuration and event types
//! - **colored**: colored quiz feedback for terminals
//!
//! ## Example
//!
//! ```ignore
//! use etude_core::{ManualClockProvider, ManualTimer, EventLog};
//! use etude_core::{PlaybackController, SchedulerConfig};
//!
//! let (provider, clock) = ManualClockProvider::new(0.0);
//! let mut metronome = PlaybackController::new(
//!     SchedulerConfig::default(),
//!     provider,
//!     EventLog::new(),
//!     ManualTimer::new(),
//! );
//! metronome.set_tempo(120);
//! metronome.start()?;
//! clock.advance(2.0);
//! metronome.tick();
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod curriculum;
pub mod dial;
pub mod error;
pub mod scheduler;
pub mod sequencer;
pub mod timer;
pub mod trainer;
pub mod types;
pub mod voice;

pub use clock::{ClockProvider, ClockSource, ManualClock, ManualClockHandle, ManualClockProvider};
pub use config::SchedulerConfig;
pub use controller::{PlaybackController, PlaybackEvent, Program};
pub use dial::TempoDial;
pub use error::{ClockError, ConfigError, CurriculumError, PlaybackError, ScriptError};
pub use scheduler::{SchedulerSession, TickOutcome};
pub use sequencer::{FixedScript, MetronomeSequencer, Pull, ScriptSequencer, Sequencer};
pub use timer::{ManualTimer, WakeTimer};
pub use trainer::{Feedback, QuizKind, Score, Trainer};
pub use types::{AudioTime, EventKind, Pitch, ScheduledEvent, Tempo, TempoRange};
pub use voice::{EventLog, Voice};
