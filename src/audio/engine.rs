//! cpal output stream and the audio clock derived from it
//!
//! The clock is the number of frames the renderer has produced divided by
//! the sample rate, so scheduling happens on the same timeline the sound is
//! rendered on. Wall time is never consulted.

use super::render::{Renderer, Trigger};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::Receiver;
use etude_core::{AudioTime, ClockError, ClockProvider, ClockSource, PlaybackError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Opens the default output device when playback first starts
pub struct CpalBackend {
    triggers: Receiver<Trigger>,
}

impl CpalBackend {
    /// `triggers` is the receiving end of the channel the voice sends on
    pub fn new(triggers: Receiver<Trigger>) -> Self {
        Self { triggers }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut renderer: Renderer,
    ) -> Result<Stream, PlaybackError>
    where
        T: Sample + SizedSample + FromSample<f32> + Send + 'static,
    {
        let mut scratch: Vec<f32> = Vec::new();
        let err_fn = |err| warn!("audio stream error: {}", err);

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    scratch.resize(data.len(), 0.0);
                    renderer.render(&mut scratch);
                    for (out, value) in data.iter_mut().zip(scratch.iter()) {
                        *out = T::from_sample(*value);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| PlaybackError::Backend(format!("failed to build output stream: {e}")))
    }
}

impl ClockProvider for CpalBackend {
    type Clock = StreamClock;

    fn acquire(&mut self) -> Result<StreamClock, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlaybackError::Backend("no output device available".to_string()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| PlaybackError::Backend(e.to_string()))?;

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();
        let sample_rate = config.sample_rate.0;
        let frames = Arc::new(AtomicU64::new(0));
        let renderer = Renderer::new(
            self.triggers.clone(),
            frames.clone(),
            sample_rate as f32,
            config.channels as usize,
        );

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, renderer)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, renderer)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, renderer)?,
            other => {
                return Err(PlaybackError::Backend(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };
        stream
            .play()
            .map_err(|e| PlaybackError::Backend(format!("failed to start stream: {e}")))?;

        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate,
            channels = config.channels,
            "audio output opened"
        );
        Ok(StreamClock {
            frames,
            sample_rate,
            stream: Some(stream),
        })
    }
}

/// Audio time read from a running output stream
pub struct StreamClock {
    frames: Arc<AtomicU64>,
    sample_rate: u32,
    stream: Option<Stream>,
}

impl StreamClock {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl ClockSource for StreamClock {
    fn now(&self) -> Result<AudioTime, ClockError> {
        if self.stream.is_none() {
            return Err(ClockError::Closed);
        }
        let frames = self.frames.load(Ordering::Acquire);
        Ok(frames as f64 / self.sample_rate as f64)
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                debug!("pausing stream on close: {}", e);
            }
            debug!("audio output closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}
