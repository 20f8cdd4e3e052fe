//! The coarse wake mechanism
//!
//! A repeating task with a single cancel handle. The scheduler never blocks;
//! it is woken every tick period by whatever timer the host provides and
//! does a bounded amount of work each time.

use std::time::Duration;

/// A repeating wake-up source owned by the playback controller
pub trait WakeTimer {
    /// Begin firing every `period`, replacing any previous arming
    fn arm(&mut self, period: Duration);

    /// Stop firing. No wake-up is delivered after this returns. Idempotent.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;
}

/// Timer that never fires on its own; the driver calls `tick()` by hand.
/// Records how it was armed and cancelled.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    period: Option<Duration>,
    arms: usize,
    cancels: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Times the timer went from idle or armed to armed
    pub fn arm_count(&self) -> usize {
        self.arms
    }

    /// Times an armed timer was cancelled
    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl WakeTimer for ManualTimer {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.arms += 1;
    }

    fn cancel(&mut self) {
        if self.period.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = ManualTimer::new();
        timer.arm(Duration::from_millis(25));
        assert!(timer.is_armed());
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.cancel_count(), 1);
        assert_eq!(timer.arm_count(), 1);
    }
}
