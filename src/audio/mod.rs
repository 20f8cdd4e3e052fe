pub mod adsr;
pub mod engine;
pub mod host;
pub mod oscillator;
pub mod render;
pub mod sampler;
pub mod voice;
pub mod wake;

pub use adsr::{AdsrEnvelope, AdsrParams};
pub use oscillator::{ToneOscillator, Waveform};
