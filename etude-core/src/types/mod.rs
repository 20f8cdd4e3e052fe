// Value types shared by the scheduler, sequencers and curriculum

pub mod pitch;
pub mod scheduled_event;
pub mod tempo;
pub mod time;

pub use pitch::{Pitch, PitchError};
pub use scheduled_event::{EventKind, EventParams, ScheduledEvent};
pub use tempo::{Tempo, TempoRange, MAX_BPM, MIN_BPM};
pub use time::{beats, whole_beats, AudioTime, Beats};
