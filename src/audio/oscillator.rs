//! Enveloped oscillators for clicks and the synthesized piano
//!
//! A `ToneOscillator` is a one-shot: it attacks when created, holds for its
//! written length, then releases and reports itself finished.

use super::adsr::{AdsrEnvelope, AdsrParams};
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    /// Pure tone, used for metronome clicks
    #[default]
    Sine,
    Triangle,
    /// Fundamental plus two decaying partials
    Piano,
}

pub struct ToneOscillator {
    frequency: f32,
    phase: f32,
    sample_rate: f32,
    gain: f32,
    envelope: AdsrEnvelope,
    waveform: Waveform,
    /// Samples left before the envelope is released
    hold: u64,
}

impl ToneOscillator {
    pub fn new(
        frequency: f32,
        sample_rate: f32,
        gain: f32,
        hold_seconds: f64,
        params: AdsrParams,
        waveform: Waveform,
    ) -> Self {
        let mut envelope = AdsrEnvelope::new(params, sample_rate);
        envelope.trigger();
        Self {
            frequency,
            phase: 0.0,
            sample_rate,
            gain,
            envelope,
            waveform,
            hold: (hold_seconds.max(0.0) * sample_rate as f64).round() as u64,
        }
    }

    /// A metronome click
    pub fn click(frequency: f32, sample_rate: f32, gain: f32, seconds: f64) -> Self {
        Self::new(
            frequency,
            sample_rate,
            gain,
            seconds,
            AdsrParams::click(),
            Waveform::Sine,
        )
    }

    /// A synthesized piano note held for `seconds`
    pub fn piano(frequency: f32, sample_rate: f32, gain: f32, seconds: f64) -> Self {
        Self::new(
            frequency,
            sample_rate,
            gain,
            seconds,
            AdsrParams::piano(),
            Waveform::Piano,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.envelope.is_finished()
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.hold == 0 {
            self.envelope.release();
        } else {
            self.hold -= 1;
        }

        let value = self.waveform_value();
        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value * self.envelope.next_sample() * self.gain
    }

    fn waveform_value(&self) -> f32 {
        let p = 2.0 * PI * self.phase;
        match self.waveform {
            Waveform::Sine => p.sin(),
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    4.0 * self.phase - 1.0
                } else {
                    3.0 - 4.0 * self.phase
                }
            }
            Waveform::Piano => (p.sin() + 0.5 * (2.0 * p).sin() + 0.25 * (3.0 * p).sin()) / 1.75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;

    #[test]
    fn test_waveforms_stay_in_range() {
        for waveform in [Waveform::Sine, Waveform::Triangle, Waveform::Piano] {
            let mut osc = ToneOscillator::new(
                440.0,
                SAMPLE_RATE,
                1.0,
                0.5,
                AdsrParams::piano(),
                waveform,
            );
            for _ in 0..2000 {
                let sample = osc.next_sample();
                assert!((-1.0..=1.0).contains(&sample), "{:?}: {}", waveform, sample);
            }
        }
    }

    #[test]
    fn test_note_finishes_after_hold_and_release() {
        let mut osc = ToneOscillator::piano(261.63, SAMPLE_RATE, 0.8, 0.1);
        let mut samples = 0;
        while !osc.is_finished() && samples < SAMPLE_RATE as usize * 2 {
            osc.next_sample();
            samples += 1;
        }
        assert!(osc.is_finished());
        // held for 0.1 s before the release began
        assert!(samples > (SAMPLE_RATE * 0.1) as usize);
    }

    #[test]
    fn test_click_is_short() {
        let mut osc = ToneOscillator::click(1000.0, SAMPLE_RATE, 1.0, 0.1);
        for _ in 0..(SAMPLE_RATE as usize / 2) {
            osc.next_sample();
        }
        assert!(osc.is_finished());
    }
}
