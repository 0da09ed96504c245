//! Mixer — Sums session outputs onto the output bus.

/// A summing bus that accumulates one block of audio from many sessions.
#[derive(Debug, Clone, Default)]
pub struct Mixer {
    buffer: Vec<f64>,
}

impl Mixer {
    pub fn new() -> Self {
        Mixer::default()
    }

    /// Prepare a buffer of `num_samples` filled with zeros.
    pub fn clear(&mut self, num_samples: usize) {
        self.buffer.clear();
        self.buffer.resize(num_samples, 0.0);
    }

    /// Add a sample at the given index.
    pub fn add(&mut self, index: usize, sample: f64) {
        if let Some(slot) = self.buffer.get_mut(index) {
            *slot += sample;
        }
    }

    /// Iterate the mixed block, clamped to [-1, 1] like a device destination.
    pub fn output(&self) -> impl Iterator<Item = f32> + '_ {
        self.buffer.iter().map(|&s| s.clamp(-1.0, 1.0) as f32)
    }
}
