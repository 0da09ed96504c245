//! Engine sound profiles — the three fixed presets the site triggers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::Waveform;
use crate::error::SynthError;
use crate::program::{FilterSpec, OscillatorSpec, Route, SoundProgram};

/// Which engine cue to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundProfile {
    /// RPM rise and fall, played on hover and while accelerating.
    Rev,
    /// Ignition sweep when the test drive begins.
    Start,
    /// Low steady rumble.
    Idle,
}

impl SoundProfile {
    pub const ALL: [SoundProfile; 3] = [SoundProfile::Rev, SoundProfile::Start, SoundProfile::Idle];

    pub fn name(self) -> &'static str {
        match self {
            SoundProfile::Rev => "rev",
            SoundProfile::Start => "start",
            SoundProfile::Idle => "idle",
        }
    }

    /// Total length of the cue in seconds.
    pub fn duration(self) -> f64 {
        match self {
            SoundProfile::Rev => 1.5,
            SoundProfile::Start => 1.2,
            SoundProfile::Idle => 2.5,
        }
    }

    /// Build the session graph for this profile.
    pub fn program(self) -> SoundProgram {
        match self {
            SoundProfile::Rev => rev(),
            SoundProfile::Start => start(),
            SoundProfile::Idle => idle(),
        }
    }
}

impl fmt::Display for SoundProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundProfile {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rev" => Ok(SoundProfile::Rev),
            "start" => Ok(SoundProfile::Start),
            "idle" => Ok(SoundProfile::Idle),
            _ => Err(SynthError::UnknownProfile(s.to_string())),
        }
    }
}

// ── Presets ─────────────────────────────────────────────────

/// Primary oscillator, its octave partner and a sine sub, in that order.
fn three_voice(
    primary: (Waveform, Envelope),
    secondary: (Waveform, Envelope),
    sub: Envelope,
    sub_gain: Envelope,
) -> Vec<OscillatorSpec> {
    vec![
        OscillatorSpec {
            waveform: primary.0,
            frequency: primary.1,
            route: Route::Filtered,
        },
        OscillatorSpec {
            waveform: secondary.0,
            frequency: secondary.1,
            route: Route::Filtered,
        },
        OscillatorSpec {
            waveform: Waveform::Sine,
            frequency: sub,
            route: Route::Direct { gain: sub_gain },
        },
    ]
}

fn rev() -> SoundProgram {
    let end = SoundProfile::Rev.duration();
    SoundProgram {
        duration: end,
        oscillators: three_voice(
            (
                Waveform::Sawtooth,
                Envelope::starting_at(45.0)
                    .exponential_to(260.0, 0.2)
                    .exponential_to(160.0, 0.7)
                    .exponential_to(70.0, end),
            ),
            (
                Waveform::Square,
                Envelope::starting_at(90.0)
                    .exponential_to(520.0, 0.2)
                    .exponential_to(320.0, 0.7)
                    .exponential_to(140.0, end),
            ),
            Envelope::starting_at(30.0)
                .exponential_to(80.0, 0.2)
                .exponential_to(40.0, end),
            Envelope::starting_at(0.12).linear_to(0.0, end),
        ),
        filter: FilterSpec {
            cutoff: Envelope::starting_at(400.0)
                .exponential_to(4000.0, 0.2)
                .exponential_to(300.0, end),
            q: 4.0,
        },
        master_gain: Envelope::starting_at(0.0)
            .linear_to(0.1, 0.05)
            .linear_to(0.07, 0.3)
            .linear_to(0.02, 1.0)
            .linear_to(0.0, end),
    }
}

fn start() -> SoundProgram {
    let end = SoundProfile::Start.duration();
    SoundProgram {
        duration: end,
        oscillators: three_voice(
            (
                Waveform::Sawtooth,
                Envelope::starting_at(30.0).exponential_to(90.0, 0.6),
            ),
            (
                Waveform::Triangle,
                Envelope::starting_at(60.0).exponential_to(180.0, 0.6),
            ),
            Envelope::starting_at(20.0).exponential_to(50.0, 0.6),
            Envelope::starting_at(0.1).linear_to(0.0, end),
        ),
        filter: FilterSpec {
            cutoff: Envelope::starting_at(300.0).exponential_to(1200.0, 0.4),
            q: 2.0,
        },
        master_gain: Envelope::starting_at(0.0)
            .linear_to(0.08, 0.1)
            .linear_to(0.04, 0.6)
            .linear_to(0.0, end),
    }
}

fn idle() -> SoundProgram {
    let end = SoundProfile::Idle.duration();
    SoundProgram {
        duration: end,
        oscillators: three_voice(
            (Waveform::Sawtooth, Envelope::starting_at(45.0)),
            (Waveform::Triangle, Envelope::starting_at(90.0)),
            Envelope::starting_at(25.0),
            Envelope::starting_at(0.08).linear_to(0.0, end),
        ),
        filter: FilterSpec {
            cutoff: Envelope::starting_at(250.0),
            q: 3.0,
        },
        // Starts silent and reaches 0.03 after 50 ms.
        master_gain: Envelope::starting_at(0.0)
            .linear_to(0.03, 0.05)
            .linear_to(0.0, end),
    }
}
