//! Sound programs — declarative descriptions of one synthesis session.
//!
//! A program lists the oscillators, the shared low-pass filter and the gain
//! envelopes of a session graph. It is plain data: backends interpret it,
//! tests inspect it, and it crosses the WASM boundary as JSON.

use serde::{Deserialize, Serialize};

use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::Waveform;
use crate::error::SynthError;

// ── Program ─────────────────────────────────────────────────

/// The full graph of one session:
/// `master(t) * (lowpass(filtered oscillators) + Σ gain(t) * direct oscillators)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundProgram {
    /// Seconds until every oscillator stops.
    pub duration: f64,
    pub oscillators: Vec<OscillatorSpec>,
    pub filter: FilterSpec,
    pub master_gain: Envelope,
}

/// One oscillator and where its output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSpec {
    pub waveform: Waveform,
    /// Frequency in Hz.
    pub frequency: Envelope,
    pub route: Route,
}

/// Signal routing for an oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Route {
    /// Through the shared low-pass filter.
    Filtered,
    /// Straight to the master gain through its own gain stage.
    Direct { gain: Envelope },
}

/// The shared low-pass filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Cutoff in Hz.
    pub cutoff: Envelope,
    /// Resonance in dB.
    pub q: f64,
}

impl SoundProgram {
    /// Check every envelope and the overall shape of the graph.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SynthError::InvalidProgram(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if self.oscillators.is_empty() {
            return Err(SynthError::InvalidProgram("no oscillators".to_string()));
        }
        if !self.filter.q.is_finite() {
            return Err(SynthError::InvalidProgram("filter Q is not finite".to_string()));
        }

        for (i, osc) in self.oscillators.iter().enumerate() {
            osc.frequency.validate(&format!("oscillators[{i}].frequency"))?;
            if let Route::Direct { gain } = &osc.route {
                gain.validate(&format!("oscillators[{i}].gain"))?;
            }
        }
        self.filter.cutoff.validate("filter.cutoff")?;
        self.master_gain.validate("master_gain")?;
        Ok(())
    }

    /// Number of samples a session of this program renders.
    pub fn frame_count(&self, sample_rate: f64) -> usize {
        (self.duration * sample_rate).ceil() as usize
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> SoundProgram {
        SoundProgram {
            duration: 1.0,
            oscillators: vec![
                OscillatorSpec {
                    waveform: Waveform::Sawtooth,
                    frequency: Envelope::starting_at(45.0).exponential_to(90.0, 1.0),
                    route: Route::Filtered,
                },
                OscillatorSpec {
                    waveform: Waveform::Sine,
                    frequency: Envelope::starting_at(30.0),
                    route: Route::Direct {
                        gain: Envelope::starting_at(0.1).linear_to(0.0, 1.0),
                    },
                },
            ],
            filter: FilterSpec {
                cutoff: Envelope::starting_at(300.0),
                q: 2.0,
            },
            master_gain: Envelope::starting_at(0.0)
                .linear_to(0.08, 0.1)
                .linear_to(0.0, 1.0),
        }
    }

    #[test]
    fn valid_program_passes() {
        assert!(simple().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut p = simple();
        p.duration = 0.0;
        assert!(matches!(p.validate(), Err(SynthError::InvalidProgram(_))));
    }

    #[test]
    fn rejects_empty_graph() {
        let mut p = simple();
        p.oscillators.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn reports_which_envelope_is_broken() {
        let mut p = simple();
        p.oscillators[1].route = Route::Direct {
            gain: Envelope::starting_at(0.1).exponential_to(0.0, 1.0),
        };
        match p.validate() {
            Err(SynthError::InvalidEnvelope { param, .. }) => {
                assert_eq!(param, "oscillators[1].gain")
            }
            other => panic!("expected envelope error, got {other:?}"),
        }
    }

    #[test]
    fn frame_count_rounds_up() {
        let mut p = simple();
        p.duration = 1.5;
        assert_eq!(p.frame_count(44100.0), 66150);
        p.duration = 0.00001;
        assert_eq!(p.frame_count(44100.0), 1);
    }

    #[test]
    fn json_roundtrip_keeps_routing() {
        let p = simple();
        let json = p.to_json().unwrap();
        assert!(json.contains("\"masterGain\""));
        assert!(json.contains("\"type\": \"direct\""));
        assert!(json.contains("\"exponential\""));
        let back: SoundProgram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
