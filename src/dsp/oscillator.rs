//! Anti-aliased oscillators using PolyBLEP.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "triangle" => Ok(Waveform::Triangle),
            other => Err(format!("unknown waveform '{other}'")),
        }
    }
}

/// A band-limited oscillator whose frequency may change every sample.
///
/// Every shape starts at phase zero; sine, sawtooth and triangle begin at a
/// zero crossing, square begins high.
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub waveform: Waveform,
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: f64) -> Self {
        Oscillator {
            waveform,
            phase: 0.0,
            sample_rate,
        }
    }

    /// Generate the next sample at `frequency` Hz.
    pub fn next_sample(&mut self, frequency: f64) -> f64 {
        // Clamp to Nyquist so PolyBLEP's correction window stays inside one cycle.
        let inc = (frequency / self.sample_rate).clamp(0.0, 0.5);
        let sample = match self.waveform {
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            Waveform::Sawtooth => self.sawtooth(inc),
            Waveform::Square => self.square(inc),
            Waveform::Triangle => self.triangle(),
        };

        self.phase += inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    /// Rises from 0 to +1, drops to -1 at half phase, rises back to 0.
    fn sawtooth(&self, inc: f64) -> f64 {
        let shifted = (self.phase + 0.5) % 1.0;
        let naive = 2.0 * shifted - 1.0;
        naive - poly_blep(shifted, inc)
    }

    fn square(&self, inc: f64) -> f64 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, inc);
        value
    }

    /// Piecewise linear: 0 → +1 → -1 → 0 over one cycle. Continuous, so no
    /// BLEP correction.
    fn triangle(&self) -> f64 {
        1.0 - 4.0 * (self.phase - 0.25).abs().min((self.phase - 1.25).abs())
    }
}

/// PolyBLEP (Polynomial Band-Limited Step) anti-aliasing correction.
///
/// `t` is the phase [0, 1), `dt` is the phase increment per sample.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(waveform: Waveform, freq: f64, n: usize) -> Vec<f64> {
        let mut osc = Oscillator::new(waveform, 44100.0);
        (0..n).map(|_| osc.next_sample(freq)).collect()
    }

    #[test]
    fn sine_zero_at_start() {
        let s = run(Waveform::Sine, 440.0, 1)[0];
        assert!(s.abs() < 1e-10, "Sine should start near 0, got {s}");
    }

    #[test]
    fn sine_range() {
        for s in run(Waveform::Sine, 440.0, 44100) {
            assert!((-1.0..=1.0).contains(&s), "Sine out of range: {s}");
        }
    }

    #[test]
    fn sawtooth_starts_at_zero_and_stays_bounded() {
        let out = run(Waveform::Sawtooth, 45.0, 44100);
        assert!(out[0].abs() < 1e-10, "Saw should start near 0, got {}", out[0]);
        for s in out {
            assert!(s.abs() <= 1.5, "Saw out of range: {s}");
        }
    }

    #[test]
    fn square_range() {
        for s in run(Waveform::Square, 90.0, 44100) {
            assert!(s.abs() <= 1.5, "Square out of range: {s}");
        }
    }

    #[test]
    fn triangle_shape() {
        // 441 Hz at 44.1 kHz = 100 samples per cycle.
        let out = run(Waveform::Triangle, 441.0, 100);
        assert!(out[0].abs() < 1e-10);
        assert!((out[25] - 1.0).abs() < 1e-9, "quarter cycle peak, got {}", out[25]);
        assert!((out[75] + 1.0).abs() < 1e-9, "three-quarter trough, got {}", out[75]);
    }

    #[test]
    fn frequency_change_keeps_phase_continuous() {
        let mut osc = Oscillator::new(Waveform::Sine, 44100.0);
        let mut prev = osc.next_sample(45.0);
        for i in 0..4410 {
            let freq = 45.0 * (260.0_f64 / 45.0).powf(i as f64 / 4410.0);
            let s = osc.next_sample(freq);
            assert!((s - prev).abs() < 0.1, "jump of {} at sample {i}", s - prev);
            prev = s;
        }
    }

    #[test]
    fn zero_frequency_is_silent_for_sine() {
        for s in run(Waveform::Sine, 0.0, 100) {
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn parse_waveform_names() {
        assert_eq!("saw".parse::<Waveform>(), Ok(Waveform::Sawtooth));
        assert_eq!("triangle".parse::<Waveform>(), Ok(Waveform::Triangle));
        assert!("noise".parse::<Waveform>().is_err());
    }
}
