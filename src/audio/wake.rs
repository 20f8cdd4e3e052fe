//! Wake timer backed by a crossbeam ticker
//!
//! The host thread selects on `receiver()`. Cancelling swaps the ticker for
//! `never()`, so a cancelled timer can not deliver another wake-up once the
//! host has picked up the new receiver.

use crossbeam_channel::{never, tick, Receiver};
use etude_core::WakeTimer;
use std::time::{Duration, Instant};
use tracing::trace;

pub struct TickTimer {
    ticks: Receiver<Instant>,
    period: Option<Duration>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self {
            ticks: never(),
            period: None,
        }
    }

    /// Channel that yields one message per wake-up
    pub fn receiver(&self) -> &Receiver<Instant> {
        &self.ticks
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeTimer for TickTimer {
    fn arm(&mut self, period: Duration) {
        trace!(?period, "wake timer armed");
        self.ticks = tick(period);
        self.period = Some(period);
    }

    fn cancel(&mut self) {
        if self.period.take().is_some() {
            trace!("wake timer cancelled");
        }
        self.ticks = never();
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_timer_fires() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(5));
        assert!(timer.is_armed());
        assert!(timer
            .receiver()
            .recv_timeout(Duration::from_millis(500))
            .is_ok());
    }

    #[test]
    fn test_cancelled_timer_is_silent() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(5));
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(timer
            .receiver()
            .recv_timeout(Duration::from_millis(30))
            .is_err());
    }
}
