//! Audio Engine — the shared audio context every session plays through.
//!
//! The engine keeps the output clock, starts sessions at the current frame,
//! mixes all active sessions block by block and drops the ones that have
//! reached their stop time. Sessions are independent: scheduling a new one
//! never touches the envelopes of those already playing.

use tracing::debug;

use crate::error::SynthError;
use crate::program::SoundProgram;

use super::mixer::Mixer;
use super::session::Session;

#[derive(Debug, Clone)]
pub struct AudioEngine {
    sample_rate: u32,
    sessions: Vec<Session>,
    mixer: Mixer,
    /// Frames rendered since the engine was created.
    frame: u64,
}

impl AudioEngine {
    /// Rates are checked when sessions are scheduled.
    pub fn new(sample_rate: u32) -> Self {
        AudioEngine {
            sample_rate,
            sessions: Vec::new(),
            mixer: Mixer::new(),
            frame: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Seconds of audio rendered so far.
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Start a new session of `program` at the next rendered frame.
    pub fn schedule(&mut self, program: &SoundProgram) -> Result<(), SynthError> {
        let session = Session::new(program, self.sample_rate)?;
        debug!(
            at = self.current_time(),
            duration = program.duration,
            active = self.sessions.len() + 1,
            "session scheduled"
        );
        self.sessions.push(session);
        Ok(())
    }

    /// Render one mono block.
    pub fn render(&mut self, out: &mut [f32]) {
        self.mix(out.len());
        for (dst, src) in out.iter_mut().zip(self.mixer.output()) {
            *dst = src;
        }
    }

    /// Render one interleaved block, copying the mono mix to every channel.
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let frames = out.len() / channels;
        self.mix(frames);
        let (whole, partial) = out.split_at_mut(frames * channels);
        for (frame, sample) in whole.chunks_mut(channels).zip(self.mixer.output()) {
            frame.fill(sample);
        }
        partial.fill(0.0);
    }

    fn mix(&mut self, frames: usize) {
        self.mixer.clear(frames);
        for session in &mut self.sessions {
            let n = session.remaining().min(frames);
            for i in 0..n {
                self.mixer.add(i, session.next_sample());
            }
        }

        let before = self.sessions.len();
        self.sessions.retain(|s| !s.is_finished());
        if self.sessions.len() != before {
            debug!(
                finished = before - self.sessions.len(),
                active = self.sessions.len(),
                "sessions released"
            );
        }
        self.frame += frames as u64;
    }
}
