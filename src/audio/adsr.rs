//! ADSR envelope generator
//!
//! Exponential segments, evaluated per sample. Times are in seconds so the
//! same parameters sound identical at any device sample rate.

/// Envelope stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Attack, decay and release are times in seconds; sustain is a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrParams {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.001),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.001),
        }
    }

    /// Struck string: instant attack, long decay into a low sustain
    pub fn piano() -> Self {
        Self::new(0.004, 0.9, 0.3, 0.25)
    }

    /// Metronome click: a few milliseconds of tone, nothing held
    pub fn click() -> Self {
        Self::new(0.001, 0.04, 0.0, 0.01)
    }

    /// Short fade used to end a sample at its written length
    pub fn sample_fade() -> Self {
        Self::new(0.001, 0.0, 1.0, 0.08)
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self::piano()
    }
}

/// Per-sample envelope state
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    params: AdsrParams,
    stage: EnvelopeStage,
    level: f32,
    attack_coeff: f32,
    decay_coeff: f32,
    release_coeff: f32,
}

/// Coefficient that closes 99.9% of the gap to the target in `time` seconds
fn coefficient(time: f32, sample_rate: f32) -> f32 {
    // ln(1000)
    const TIME_CONSTANT: f32 = 6.9;
    if time > 0.0 {
        1.0 - (-TIME_CONSTANT / (time * sample_rate)).exp()
    } else {
        1.0
    }
}

impl AdsrEnvelope {
    pub fn new(params: AdsrParams, sample_rate: f32) -> Self {
        Self {
            params,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            attack_coeff: coefficient(params.attack, sample_rate),
            decay_coeff: coefficient(params.decay, sample_rate),
            release_coeff: coefficient(params.release, sample_rate),
        }
    }

    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    pub fn release(&mut self) {
        if self.stage != EnvelopeStage::Idle {
            self.stage = EnvelopeStage::Release;
        }
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_finished(&self) -> bool {
        self.stage == EnvelopeStage::Idle
    }

    /// Advance one sample and return the amplitude, 0.0-1.0
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }
            EnvelopeStage::Attack => {
                self.level += (1.0 - self.level) * self.attack_coeff;
                if self.level >= 0.999 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                let target = self.params.sustain;
                self.level += (target - self.level) * self.decay_coeff;
                if (self.level - target).abs() < 0.001 {
                    self.level = target;
                    // a zero sustain means the sound is over
                    self.stage = if target <= 0.0 {
                        EnvelopeStage::Idle
                    } else {
                        EnvelopeStage::Sustain
                    };
                }
            }
            EnvelopeStage::Sustain => {
                self.level = self.params.sustain;
            }
            EnvelopeStage::Release => {
                self.level -= self.level * self.release_coeff;
                if self.level < 0.0001 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;

    #[test]
    fn test_envelope_idle_start() {
        let env = AdsrEnvelope::new(AdsrParams::default(), SAMPLE_RATE);
        assert_eq!(env.stage(), EnvelopeStage::Idle);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_attack_rises_then_decays() {
        let mut env = AdsrEnvelope::new(AdsrParams::piano(), SAMPLE_RATE);
        env.trigger();
        for _ in 0..100 {
            env.next_sample();
        }
        assert!(env.level() > 0.0);
        for _ in 0..2000 {
            env.next_sample();
        }
        assert_eq!(env.stage(), EnvelopeStage::Decay);
    }

    #[test]
    fn test_click_ends_without_release() {
        let mut env = AdsrEnvelope::new(AdsrParams::click(), SAMPLE_RATE);
        env.trigger();
        for _ in 0..(SAMPLE_RATE as usize) {
            env.next_sample();
        }
        assert!(env.is_finished());
    }

    #[test]
    fn test_release_fades_to_idle() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.001, 0.01, 0.6, 0.01), SAMPLE_RATE);
        env.trigger();
        for _ in 0..5000 {
            env.next_sample();
        }
        assert_eq!(env.stage(), EnvelopeStage::Sustain);
        assert!((env.level() - 0.6).abs() < 0.01);

        env.release();
        for _ in 0..5000 {
            env.next_sample();
        }
        assert!(env.is_finished());
    }

    #[test]
    fn test_output_range() {
        let mut env = AdsrEnvelope::new(AdsrParams::default(), SAMPLE_RATE);
        env.trigger();
        for i in 0..20000 {
            if i == 10000 {
                env.release();
            }
            let sample = env.next_sample();
            assert!((0.0..=1.0).contains(&sample), "sample {} out of range", sample);
        }
    }
}
