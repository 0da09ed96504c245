//! DSP Engine — Pure Rust engine sound synthesis.
//!
//! All DSP runs in Rust for deterministic, cross-platform output. The same
//! code feeds the WebAudio worklet (via WASM), the native device backend and
//! the offline WAV renderer.

pub mod engine;
pub mod envelope;
pub mod filter;
pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod session;

use crate::error::SynthError;

/// Lowest output rate accepted anywhere in the crate, in Hz.
pub const MIN_SAMPLE_RATE: u32 = 3000;
/// Highest output rate accepted anywhere in the crate, in Hz.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

pub fn sample_rate_in_range(sample_rate: u32) -> bool {
    (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate)
}

pub(crate) fn check_sample_rate(sample_rate: u32) -> Result<(), SynthError> {
    if sample_rate_in_range(sample_rate) {
        Ok(())
    } else {
        Err(SynthError::InvalidSampleRate(sample_rate))
    }
}
