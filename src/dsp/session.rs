//! Session — one fire-and-forget instance of a sound program.

use crate::error::SynthError;
use crate::program::{Route, SoundProgram};

use super::check_sample_rate;
use super::envelope::Envelope;
use super::filter::LowpassFilter;
use super::oscillator::Oscillator;

/// A running oscillator plus the envelopes that drive it.
#[derive(Debug, Clone)]
struct SessionVoice {
    oscillator: Oscillator,
    frequency: Envelope,
    /// `None` when the voice feeds the filter.
    direct_gain: Option<Envelope>,
}

/// Renders a [`SoundProgram`] sample by sample until its stop time.
///
/// Owns every node of its graph; nothing is shared with other sessions.
#[derive(Debug, Clone)]
pub struct Session {
    voices: Vec<SessionVoice>,
    filter: LowpassFilter,
    cutoff: Envelope,
    master_gain: Envelope,
    sample_rate: f64,
    position: usize,
    stop_frame: usize,
}

impl Session {
    pub fn new(program: &SoundProgram, sample_rate: u32) -> Result<Self, SynthError> {
        check_sample_rate(sample_rate)?;
        program.validate()?;
        let sample_rate = sample_rate as f64;

        let voices = program
            .oscillators
            .iter()
            .map(|spec| SessionVoice {
                oscillator: Oscillator::new(spec.waveform, sample_rate),
                frequency: spec.frequency.clone(),
                direct_gain: match &spec.route {
                    Route::Filtered => None,
                    Route::Direct { gain } => Some(gain.clone()),
                },
            })
            .collect();

        Ok(Session {
            voices,
            filter: LowpassFilter::new(
                program.filter.cutoff.value_at(0.0),
                program.filter.q,
                sample_rate,
            ),
            cutoff: program.filter.cutoff.clone(),
            master_gain: program.master_gain.clone(),
            sample_rate,
            position: 0,
            stop_frame: program.frame_count(sample_rate),
        })
    }

    /// Seconds since the session started.
    pub fn time(&self) -> f64 {
        self.position as f64 / self.sample_rate
    }

    /// Generate the next sample. Silent once the stop time is reached.
    pub fn next_sample(&mut self) -> f64 {
        if self.is_finished() {
            return 0.0;
        }

        let t = self.time();
        let mut filtered_in = 0.0;
        let mut direct = 0.0;
        for voice in &mut self.voices {
            let s = voice.oscillator.next_sample(voice.frequency.value_at(t));
            match &voice.direct_gain {
                None => filtered_in += s,
                Some(gain) => direct += s * gain.value_at(t),
            }
        }

        self.filter.set_frequency(self.cutoff.value_at(t));
        let filtered = self.filter.process(filtered_in);

        self.position += 1;
        (filtered + direct) * self.master_gain.value_at(t)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.stop_frame
    }

    /// Samples left before the session stops.
    pub fn remaining(&self) -> usize {
        self.stop_frame.saturating_sub(self.position)
    }
}
