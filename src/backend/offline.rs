use crate::dsp::check_sample_rate;
use crate::dsp::engine::AudioEngine;
use crate::error::SynthError;
use crate::program::SoundProgram;

use super::AudioBackend;

/// Pull-based backend: the host asks for blocks of samples.
///
/// Used by the WASM worklet wrapper and anywhere output is consumed
/// off-device.
#[derive(Debug, Clone)]
pub struct OfflineBackend {
    engine: AudioEngine,
    sample_rate: u32,
}

impl OfflineBackend {
    pub fn new(sample_rate: u32) -> Result<Self, SynthError> {
        check_sample_rate(sample_rate)?;
        Ok(OfflineBackend {
            engine: AudioEngine::new(sample_rate),
            sample_rate,
        })
    }

    /// Render the next mono block.
    pub fn render(&mut self, out: &mut [f32]) {
        self.engine.render(out);
    }

    pub fn active_sessions(&self) -> usize {
        self.engine.active_sessions()
    }

    pub fn current_time(&self) -> f64 {
        self.engine.current_time()
    }
}

impl AudioBackend for OfflineBackend {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, program: &SoundProgram) -> Result<(), SynthError> {
        self.engine.schedule(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SoundProfile;

    #[test]
    fn plays_and_renders() {
        let mut backend = OfflineBackend::new(8000).unwrap();
        assert_eq!(backend.sample_rate(), 8000);
        backend.play(&SoundProfile::Start.program()).unwrap();
        assert_eq!(backend.active_sessions(), 1);

        let mut buf = vec![0.0_f32; 9600];
        backend.render(&mut buf);
        assert!(buf.iter().any(|&s| s != 0.0));
        assert_eq!(backend.active_sessions(), 0);
        assert!((backend.current_time() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_sample_rate() {
        for rate in [0, 1, 1_000_000, u32::MAX] {
            assert!(
                matches!(OfflineBackend::new(rate), Err(SynthError::InvalidSampleRate(r)) if r == rate),
                "{rate} Hz should be rejected"
            );
        }
    }
}
