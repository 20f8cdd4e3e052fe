//! # Etude
//!
//! A metronome and ear-training companion for piano students, built on the
//! lookahead scheduler in `etude-core`.
//!
//! ## Modules
//!
//! - `audio`: the cpal output stream and the audio clock read from it, the
//!   sample-accurate renderer, synthesized and sampled piano voices, the
//!   crossbeam tick timer and the playback thread that owns the controller.
//! - `commands`: the REPL command registry and its handlers.
//! - `repl`: the interactive prompt.
//! - `timeline`: offline schedule printing against a manual clock.

pub mod audio;
pub mod commands;
pub mod repl;
pub mod timeline;

pub use crate::audio::host::{HostHandle, HostStatus, PlaybackHost};
