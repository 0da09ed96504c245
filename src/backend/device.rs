//! Live output on the default device through cpal.

use std::sync::mpsc::{self, Receiver, Sender};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error};

use crate::dsp::engine::AudioEngine;
use crate::error::SynthError;
use crate::program::SoundProgram;

use super::AudioBackend;

/// Plays sessions on the default output device.
///
/// The stream callback owns the [`AudioEngine`]; programs reach it over a
/// channel and start at the beginning of the next device block.
pub struct CpalBackend {
    programs: Sender<SoundProgram>,
    sample_rate: u32,
    /// Kept alive for as long as the backend exists.
    _stream: cpal::Stream,
}

impl CpalBackend {
    pub fn new() -> Result<Self, SynthError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| SynthError::BackendUnavailable("no output device".to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| SynthError::BackendUnavailable(format!("default output config: {e}")))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let (programs, receiver) = mpsc::channel();

        let mut engine = AudioEngine::new(sample_rate);
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    drain(&receiver, &mut engine);
                    engine.render_interleaved(data, channels);
                },
                |err| error!("Audio stream error: {}", err),
                None,
            ),
            cpal::SampleFormat::I16 => {
                let mut scratch: Vec<f32> = vec![0.0; 4096];
                device.build_output_stream(
                    &config.into(),
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        if scratch.len() < data.len() {
                            scratch.resize(data.len(), 0.0);
                        }
                        drain(&receiver, &mut engine);
                        engine.render_interleaved(&mut scratch[..data.len()], channels);
                        for (dst, &src) in data.iter_mut().zip(&scratch) {
                            *dst = (src * i16::MAX as f32) as i16;
                        }
                    },
                    |err| error!("Audio stream error: {}", err),
                    None,
                )
            }
            other => {
                return Err(SynthError::BackendUnavailable(format!(
                    "unsupported sample format {other:?}"
                )));
            }
        }
        .map_err(|e| SynthError::BackendUnavailable(format!("build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| SynthError::BackendUnavailable(format!("start output stream: {e}")))?;

        debug!(sample_rate, channels, "audio output started");

        Ok(CpalBackend {
            programs,
            sample_rate,
            _stream: stream,
        })
    }
}

fn drain(receiver: &Receiver<SoundProgram>, engine: &mut AudioEngine) {
    while let Ok(program) = receiver.try_recv() {
        if let Err(e) = engine.schedule(&program) {
            error!("Dropped sound program: {}", e);
        }
    }
}

impl AudioBackend for CpalBackend {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, program: &SoundProgram) -> Result<(), SynthError> {
        // Invalid programs must never reach the audio thread.
        program.validate()?;
        self.programs
            .send(program.clone())
            .map_err(|_| SynthError::BackendUnavailable("output stream closed".to_string()))
    }
}
