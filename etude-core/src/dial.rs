//! Tempo dial: the rotary knob and typed tempo entry
//!
//! A pure input device. It maps angles and text to tempos and never touches
//! audio; the result is handed to `PlaybackController::set_tempo`.

use crate::types::{Tempo, TempoRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TempoDial {
    range: TempoRange,
}

impl TempoDial {
    pub fn new(range: TempoRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> TempoRange {
        self.range
    }

    /// Tempo for a knob angle in degrees. 0° is the slowest tempo; a full
    /// turn wraps back to it.
    pub fn tempo_at_angle(&self, degrees: f64) -> Tempo {
        if !degrees.is_finite() {
            return self.range.clamp(self.range.min as i64);
        }
        let turn = degrees.rem_euclid(360.0) / 360.0;
        let bpm = (turn * self.range.span() as f64 + self.range.min as f64).round();
        self.range.clamp(bpm as i64)
    }

    /// Knob angle in degrees that shows `tempo`
    pub fn angle_of(&self, tempo: Tempo) -> f64 {
        let span = self.range.span();
        if span == 0 {
            return 0.0;
        }
        let bpm = self.range.clamp(tempo.bpm() as i64).bpm();
        (bpm - self.range.min) as f64 / span as f64 * 360.0
    }

    /// Tempo for typed input. Leading digits are read and anything after
    /// them ignored; input without a number keeps `current`. Numbers are
    /// clamped, never rejected.
    pub fn commit_text(&self, input: &str, current: Tempo) -> Tempo {
        match leading_integer(input) {
            Some(bpm) => self.range.clamp(bpm),
            None => current,
        }
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // saturate absurdly long input rather than failing
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}
