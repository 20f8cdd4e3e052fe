//! Offline timeline
//!
//! Runs a program against a manual clock and prints every event the
//! scheduler commits, with its exact audio time. No audio device is opened,
//! so this works anywhere and shows precisely what a live session would send
//! to the renderer.

use anyhow::{bail, Context, Result};
use colored::*;
use etude_core::{
    EventKind, EventLog, ManualClockProvider, ManualTimer, PlaybackController, Program,
    ScheduledEvent, SchedulerConfig,
};
use std::fmt::Write;
use std::str::FromStr;
use tracing::debug;

/// A tempo request at a point in the timeline, written `seconds:bpm`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoChange {
    pub at: f64,
    pub bpm: i64,
}

impl FromStr for TempoChange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (at, bpm) = s
            .split_once(':')
            .with_context(|| format!("tempo change '{}' should look like 4.5:120", s))?;
        let at: f64 = at.trim().parse().with_context(|| format!("bad time in '{}'", s))?;
        if !at.is_finite() || at < 0.0 {
            bail!("tempo change time must be a non-negative number of seconds");
        }
        let bpm = bpm.trim().parse().with_context(|| format!("bad tempo in '{}'", s))?;
        Ok(TempoChange { at, bpm })
    }
}

/// Everything committed to the voice during the first `seconds` of playback.
///
/// The clock advances one tick period at a time, the way the wake timer
/// would drive it, and tempo changes are applied at the first tick at or
/// after their time.
pub fn collect(
    config: SchedulerConfig,
    program: Program,
    changes: &[TempoChange],
    seconds: f64,
) -> Result<Vec<ScheduledEvent>> {
    config.validate().context("invalid scheduler configuration")?;
    let step = config.tick_period.as_secs_f64();

    let (provider, clock) = ManualClockProvider::new(0.0);
    let mut controller =
        PlaybackController::new(config, provider, EventLog::new(), ManualTimer::new());
    controller.load(program);
    controller.start()?;

    let mut pending: Vec<TempoChange> = changes.to_vec();
    pending.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = pending.into_iter().peekable();

    let mut ticks = 0usize;
    while controller.is_running() && clock.now() < seconds {
        while let Some(change) = pending.next_if(|c| c.at <= clock.now()) {
            controller.set_tempo(change.bpm);
        }
        controller.tick();
        clock.advance(step);
        ticks += 1;
    }
    debug!(ticks, "timeline drive finished");

    let mut events = controller.voice_mut().take();
    events.retain(|e| e.target_time < seconds);
    controller.teardown();
    Ok(events)
}

/// One line per event: time, what sounds, and how long
pub fn format(events: &[ScheduledEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let time = format!("{:8.3}s", event.target_time);
        let line = match event.kind {
            EventKind::Beat => {
                let label = format!("beat {}", event.step + 1);
                if event.params.accent {
                    format!("{}  {}", time, label.bright_yellow().bold())
                } else {
                    format!("{}  {}", time, label)
                }
            }
            EventKind::Note | EventKind::ChordTone => {
                let pitch = event
                    .params
                    .pitch
                    .map_or_else(|| "-".to_string(), |p| p.name());
                let kind = if event.kind == EventKind::Note {
                    "note "
                } else {
                    "chord"
                };
                format!(
                    "{}  {} {:<4} {}",
                    time,
                    kind,
                    pitch.bright_cyan(),
                    format!("held {:.2}s", event.params.duration).dimmed()
                )
            }
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}
