//! The voice seam: whatever actually makes sound
//!
//! The scheduler only promises a voice the exact start time of each event,
//! ahead of time. Honouring that timestamp, mapping pitches to samples and
//! shaping the sound are the voice's business.

use crate::types::{AudioTime, EventKind, ScheduledEvent};

/// Renders scheduled events. `play` must not block.
pub trait Voice {
    /// Whether the sound assets are loaded. Playback refuses to start
    /// while this is false.
    fn is_ready(&self) -> bool {
        true
    }

    fn play(&mut self, event: &ScheduledEvent);
}

impl<V: Voice + ?Sized> Voice for Box<V> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn play(&mut self, event: &ScheduledEvent) {
        (**self).play(event)
    }
}

/// A voice that writes events down instead of sounding them
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<ScheduledEvent>,
    ready: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            ready: true,
        }
    }

    /// A log that reports its assets as still loading
    pub fn loading() -> Self {
        Self {
            events: Vec::new(),
            ready: false,
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<ScheduledEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Target times of all logged clicks
    pub fn beat_times(&self) -> Vec<AudioTime> {
        self.times_of(EventKind::Beat)
    }

    pub fn times_of(&self, kind: EventKind) -> Vec<AudioTime> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.target_time)
            .collect()
    }
}

impl Voice for EventLog {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play(&mut self, event: &ScheduledEvent) {
        self.events.push(event.clone());
    }
}
