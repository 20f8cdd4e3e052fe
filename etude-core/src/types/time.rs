//! Time types for scheduling
//!
//! Two timelines meet here. Audio time is the continuous, monotonic clock of
//! the output device, in seconds. Musical durations are exact rationals in
//! beats, so that long melodies sum without floating-point drift before they
//! are converted to seconds once.

use num_rational::Ratio;

/// A point on a clock source's timeline, in seconds.
///
/// Only meaningful relative to other readings of the same clock.
pub type AudioTime = f64;

/// Exact musical duration in beats (quarter notes)
pub type Beats = Ratio<i64>;

/// Helper to create a duration of n/d beats
#[inline]
pub fn beats(n: i64, d: i64) -> Beats {
    Ratio::new(n, d)
}

/// Whole beats
#[inline]
pub fn whole_beats(n: i64) -> Beats {
    Ratio::from_integer(n)
}

/// Finest note value a written length is snapped to: 1/48 of a beat holds
/// sixteenths, thirty-seconds and both triplet grids exactly.
pub const GRID_PER_BEAT: i64 = 48;

/// Beat count as a float, for converting to seconds
#[inline]
pub fn beat_value(b: Beats) -> f64 {
    *b.numer() as f64 / *b.denom() as f64
}

/// Written note length, snapped to the nearest grid step
pub fn snap_beats(length: f64) -> Beats {
    let steps = (length * GRID_PER_BEAT as f64).round() as i64;
    Ratio::new(steps, GRID_PER_BEAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_creation() {
        let b = beats(3, 4);
        assert_eq!(*b.numer(), 3);
        assert_eq!(*b.denom(), 4);
    }

    #[test]
    fn test_exact_sum() {
        // 0.75 + 0.25 is exactly one beat
        assert_eq!(beats(3, 4) + beats(1, 4), whole_beats(1));
    }

    #[test]
    fn test_snap_written_lengths() {
        assert_eq!(snap_beats(1.5), beats(3, 2));
        assert_eq!(snap_beats(0.75), beats(3, 4));
        // a triplet eighth written to three places
        assert_eq!(snap_beats(0.333), beats(1, 3));
        assert_eq!(beat_value(snap_beats(0.25)), 0.25);
    }

    #[test]
    fn test_beat_value() {
        assert!((beat_value(beats(1, 3)) - 0.333_333_333).abs() < 1e-6);
    }
}
