//! Clock sources: the audio timebase every event is scheduled against
//!
//! A clock source is an owned resource. It is acquired lazily by the
//! playback controller, read on every scheduler tick, and closed exactly
//! once on teardown. Reading a closed clock is an error, never a panic.

use crate::error::{ClockError, PlaybackError};
use crate::types::AudioTime;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// A monotonic, high-resolution audio timebase
pub trait ClockSource {
    /// Current audio time in seconds. Never decreases while the clock is open.
    fn now(&self) -> Result<AudioTime, ClockError>;

    /// Release the underlying resource. Calling it again is a no-op.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

/// Something that can open a clock source (an audio device, a test double)
pub trait ClockProvider {
    type Clock: ClockSource;

    fn acquire(&mut self) -> Result<Self::Clock, PlaybackError>;
}

/// Shared state between a manual clock and its handle
#[derive(Debug, Default)]
struct ManualState {
    /// Current time stored as f64 bits
    now: AtomicU64,
    closed: AtomicBool,
    closes: AtomicUsize,
    acquisitions: AtomicUsize,
}

impl ManualState {
    fn now(&self) -> f64 {
        f64::from_bits(self.now.load(Ordering::Acquire))
    }
}

/// A clock that only moves when told to.
///
/// Used by tests and by the offline timeline, where time is simulated.
#[derive(Debug)]
pub struct ManualClock {
    state: Arc<ManualState>,
}

/// Controls a [`ManualClock`] from outside the controller that owns it
#[derive(Debug, Clone)]
pub struct ManualClockHandle {
    state: Arc<ManualState>,
}

impl ManualClock {
    /// Create a clock at `origin` seconds, plus a handle to drive it
    pub fn new(origin: AudioTime) -> (Self, ManualClockHandle) {
        let state = Arc::new(ManualState::default());
        state.now.store(origin.to_bits(), Ordering::Release);
        (
            Self {
                state: state.clone(),
            },
            ManualClockHandle { state },
        )
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> Result<AudioTime, ClockError> {
        if self.state.closed.load(Ordering::Acquire) {
            return Err(ClockError::Closed);
        }
        Ok(self.state.now())
    }

    fn close(&mut self) {
        if !self.state.closed.swap(true, Ordering::AcqRel) {
            self.state.closes.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }
}

impl ManualClockHandle {
    /// Move time forward by `seconds`. Negative values are ignored.
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.set(self.now() + seconds);
        }
    }

    /// Jump to `time` if it lies in the future
    pub fn set(&self, time: AudioTime) {
        let _ = self
            .state
            .now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (time > f64::from_bits(bits)).then(|| time.to_bits())
            });
    }

    pub fn now(&self) -> AudioTime {
        self.state.now()
    }

    /// Close the clock from outside, as a device teardown race would
    pub fn close(&self) {
        if !self.state.closed.swap(true, Ordering::AcqRel) {
            self.state.closes.fetch_add(1, Ordering::AcqRel);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    /// How many times the clock transitioned to closed
    pub fn close_count(&self) -> usize {
        self.state.closes.load(Ordering::Acquire)
    }

    /// How many times a provider handed this clock out
    pub fn acquisitions(&self) -> usize {
        self.state.acquisitions.load(Ordering::Acquire)
    }
}

/// Provider handing out one shared [`ManualClock`] timeline
#[derive(Debug, Clone)]
pub struct ManualClockProvider {
    handle: ManualClockHandle,
}

impl ManualClockProvider {
    pub fn new(origin: AudioTime) -> (Self, ManualClockHandle) {
        let (_, handle) = ManualClock::new(origin);
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }
}

impl ClockProvider for ManualClockProvider {
    type Clock = ManualClock;

    fn acquire(&mut self) -> Result<ManualClock, PlaybackError> {
        let state = self.handle.state.clone();
        state.acquisitions.fetch_add(1, Ordering::AcqRel);
        state.closed.store(false, Ordering::Release);
        Ok(ManualClock { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let (clock, handle) = ManualClock::new(1.0);
        assert_eq!(clock.now().unwrap(), 1.0);
        handle.advance(0.25);
        assert_eq!(clock.now().unwrap(), 1.25);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let (clock, handle) = ManualClock::new(5.0);
        handle.set(3.0);
        handle.advance(-1.0);
        assert_eq!(clock.now().unwrap(), 5.0);
    }

    #[test]
    fn test_closed_clock_errors() {
        let (mut clock, handle) = ManualClock::new(0.0);
        clock.close();
        clock.close();
        assert_eq!(clock.now(), Err(ClockError::Closed));
        assert!(clock.is_closed());
        assert_eq!(handle.close_count(), 1);
    }

    #[test]
    fn test_provider_counts_acquisitions() {
        let (mut provider, handle) = ManualClockProvider::new(0.0);
        let clock = provider.acquire().unwrap();
        handle.advance(2.0);
        assert_eq!(clock.now().unwrap(), 2.0);
        assert_eq!(handle.acquisitions(), 1);
    }
}
