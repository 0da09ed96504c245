//! Breakpoint envelopes — time-varying parameter curves.
//!
//! Evaluation follows browser `AudioParam` automation: each breakpoint
//! describes how the value travels from the previous breakpoint to its own
//! `(time, value)`, and the last value holds forever after.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// How a breakpoint is approached from the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ramp {
    /// Hold the previous value, then jump at the breakpoint time.
    Set,
    /// Straight line from the previous breakpoint.
    Linear,
    /// Geometric curve from the previous breakpoint.
    Exponential,
}

/// A single automation event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Seconds from session start.
    pub time: f64,
    pub value: f64,
    pub ramp: Ramp,
}

/// An ordered list of breakpoints plus the value used before the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub default: f64,
    pub points: Vec<Breakpoint>,
}

impl Envelope {
    /// An envelope with no events, sitting at `default`.
    pub fn new(default: f64) -> Self {
        Envelope {
            default,
            points: Vec::new(),
        }
    }

    /// An envelope that is set to `value` at time zero.
    pub fn starting_at(value: f64) -> Self {
        Envelope::new(value).set_at(value, 0.0)
    }

    pub fn set_at(self, value: f64, time: f64) -> Self {
        self.push(value, time, Ramp::Set)
    }

    pub fn linear_to(self, value: f64, time: f64) -> Self {
        self.push(value, time, Ramp::Linear)
    }

    pub fn exponential_to(self, value: f64, time: f64) -> Self {
        self.push(value, time, Ramp::Exponential)
    }

    fn push(mut self, value: f64, time: f64, ramp: Ramp) -> Self {
        self.points.push(Breakpoint { time, value, ramp });
        self
    }

    /// Check the automation rules. `param` names the parameter in errors.
    pub fn validate(&self, param: &str) -> Result<(), SynthError> {
        if !self.default.is_finite() {
            return Err(SynthError::envelope(param, "default value is not finite"));
        }
        let mut last_time = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            if !p.time.is_finite() || p.time < 0.0 {
                return Err(SynthError::envelope(
                    param,
                    format!("breakpoint {i} has invalid time {}", p.time),
                ));
            }
            if p.time < last_time {
                return Err(SynthError::envelope(
                    param,
                    format!("breakpoint {i} at {}s precedes {last_time}s", p.time),
                ));
            }
            if !p.value.is_finite() {
                return Err(SynthError::envelope(
                    param,
                    format!("breakpoint {i} has non-finite value"),
                ));
            }
            if p.ramp == Ramp::Exponential && p.value == 0.0 {
                return Err(SynthError::envelope(
                    param,
                    format!("exponential ramp {i} targets zero"),
                ));
            }
            last_time = p.time;
        }
        Ok(())
    }

    /// Value of the parameter at `t` seconds.
    pub fn value_at(&self, t: f64) -> f64 {
        let mut prev_time = 0.0;
        let mut prev_value = self.default;

        for p in &self.points {
            if p.time <= t {
                prev_time = p.time;
                prev_value = p.value;
                continue;
            }

            let span = p.time - prev_time;
            if span <= 0.0 {
                return prev_value;
            }
            let frac = (t - prev_time) / span;
            return match p.ramp {
                Ramp::Set => prev_value,
                Ramp::Linear => prev_value + (p.value - prev_value) * frac,
                Ramp::Exponential => {
                    if prev_value == 0.0 || prev_value.signum() != p.value.signum() {
                        prev_value
                    } else {
                        prev_value * (p.value / prev_value).powf(frac)
                    }
                }
            };
        }

        prev_value
    }

    /// Time of the last breakpoint, or zero for a constant envelope.
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    /// Largest value any breakpoint reaches.
    pub fn peak(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.value)
            .fold(self.default, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_envelope_holds_default() {
        let env = Envelope::new(0.5);
        assert_eq!(env.value_at(0.0), 0.5);
        assert_eq!(env.value_at(10.0), 0.5);
        assert_eq!(env.end_time(), 0.0);
    }

    #[test]
    fn breakpoints_are_hit_exactly() {
        let env = Envelope::starting_at(45.0)
            .exponential_to(260.0, 0.2)
            .exponential_to(160.0, 0.7)
            .exponential_to(70.0, 1.5);

        assert_eq!(env.value_at(0.0), 45.0);
        assert_eq!(env.value_at(0.2), 260.0);
        assert_eq!(env.value_at(0.7), 160.0);
        assert_eq!(env.value_at(1.5), 70.0);
        assert_eq!(env.value_at(3.0), 70.0, "last value should hold");
    }

    #[test]
    fn exponential_midpoint_is_geometric_mean() {
        let env = Envelope::starting_at(100.0).exponential_to(400.0, 1.0);
        let mid = env.value_at(0.5);
        assert!((mid - 200.0).abs() < 1e-9, "expected 200, got {mid}");
    }

    #[test]
    fn linear_midpoint() {
        let env = Envelope::starting_at(0.0).linear_to(0.1, 0.05);
        let mid = env.value_at(0.025);
        assert!((mid - 0.05).abs() < 1e-12, "expected 0.05, got {mid}");
    }

    #[test]
    fn set_holds_until_its_time() {
        let env = Envelope::starting_at(1.0).set_at(2.0, 0.5);
        assert_eq!(env.value_at(0.49), 1.0);
        assert_eq!(env.value_at(0.5), 2.0);
    }

    #[test]
    fn exponential_from_zero_holds_previous() {
        let env = Envelope::starting_at(0.0).exponential_to(1.0, 1.0);
        assert_eq!(env.value_at(0.5), 0.0);
        assert_eq!(env.value_at(1.0), 1.0);
    }

    #[test]
    fn ramp_without_initial_set_starts_from_default() {
        let env = Envelope::new(1.0).linear_to(0.0, 2.0);
        assert!((env.value_at(1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_envelopes() {
        let zero_target = Envelope::starting_at(1.0).exponential_to(0.0, 1.0);
        assert!(zero_target.validate("freq").is_err());

        let backwards = Envelope::starting_at(1.0)
            .linear_to(0.5, 1.0)
            .linear_to(0.2, 0.5);
        assert!(backwards.validate("gain").is_err());

        let negative_time = Envelope::new(0.0).set_at(1.0, -0.1);
        assert!(negative_time.validate("gain").is_err());

        let nan = Envelope::starting_at(f64::NAN);
        assert!(nan.validate("gain").is_err());

        let ok = Envelope::starting_at(0.0).linear_to(0.1, 0.05);
        assert!(ok.validate("gain").is_ok());
    }

    #[test]
    fn peak_and_end_time() {
        let env = Envelope::starting_at(0.0)
            .linear_to(0.1, 0.05)
            .linear_to(0.07, 0.3)
            .linear_to(0.0, 1.5);
        assert_eq!(env.peak(), 0.1);
        assert_eq!(env.end_time(), 1.5);
    }
}
