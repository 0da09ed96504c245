//! Offline renderer — renders programs to sample buffers and WAV bytes.

use std::io::Cursor;

use crate::error::SynthError;
use crate::profile::SoundProfile;
use crate::program::SoundProgram;

use super::check_sample_rate;
use super::engine::AudioEngine;

/// Render a whole program to mono samples, exactly as long as the program.
pub fn render_program(program: &SoundProgram, sample_rate: u32) -> Result<Vec<f32>, SynthError> {
    check_sample_rate(sample_rate)?;
    let mut engine = AudioEngine::new(sample_rate);
    engine.schedule(program)?;

    let mut samples = vec![0.0_f32; program.frame_count(sample_rate as f64)];
    engine.render(&mut samples);
    Ok(samples)
}

pub fn render_profile(profile: SoundProfile, sample_rate: u32) -> Result<Vec<f32>, SynthError> {
    render_program(&profile.program(), sample_rate)
}

/// Render a profile to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(profile: SoundProfile, sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    let samples = render_profile(profile, sample_rate)?;
    encode_wav(&samples, sample_rate)
}

/// Encode mono f32 samples to a 16-bit PCM WAV byte buffer.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &s in samples {
            writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
