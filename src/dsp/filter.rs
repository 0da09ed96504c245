//! Low-pass biquad — matches WebAudio `BiquadFilterNode` lowpass coefficients.

use std::f64::consts::PI;

/// A resonant 2nd-order low-pass IIR filter.
///
/// Direct Form II Transposed, coefficients from the Audio EQ Cookbook with
/// the WebAudio convention that `q` is a resonance peak in dB.
#[derive(Debug, Clone)]
pub struct LowpassFilter {
    frequency: f64,
    q: f64,

    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    z1: f64,
    z2: f64,

    sample_rate: f64,
}

impl LowpassFilter {
    pub fn new(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let mut f = LowpassFilter {
            frequency,
            q,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
            sample_rate,
        };
        f.update_coefficients();
        f
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    fn update_coefficients(&mut self) {
        let nyquist = self.sample_rate / 2.0;
        let cutoff = self.frequency.clamp(0.0, nyquist) / nyquist;

        let (b0, b1, b2, a1, a2) = if cutoff >= 1.0 {
            (1.0, 0.0, 0.0, 0.0, 0.0)
        } else if cutoff <= 0.0 {
            (0.0, 0.0, 0.0, 0.0, 0.0)
        } else {
            let w0 = PI * cutoff;
            let cos_w0 = w0.cos();
            let alpha = w0.sin() / (2.0 * 10f64.powf(self.q / 20.0));
            let a0 = 1.0 + alpha;
            let b1 = (1.0 - cos_w0) / a0;
            (b1 / 2.0, b1, b1 / 2.0, -2.0 * cos_w0 / a0, (1.0 - alpha) / a0)
        };

        self.b0 = b0;
        self.b1 = b1;
        self.b2 = b2;
        self.a1 = a1;
        self.a2 = a2;
    }

    /// Move the cutoff. Coefficients are only recomputed when it changes.
    pub fn set_frequency(&mut self, frequency: f64) {
        if frequency != self.frequency {
            self.frequency = frequency;
            self.update_coefficients();
        }
    }

    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.z1;
        self.z1 = self.b1 * input - self.a1 * output + self.z2;
        self.z2 = self.b2 * input - self.a2 * output;
        output
    }
}
