//! Runtime configuration: output sample rate, initial sound state and the
//! externally hosted test-drive video.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::sample_rate_in_range;
use crate::error::ConfigError;

pub const ENV_SAMPLE_RATE: &str = "AURA_SAMPLE_RATE";
pub const ENV_SOUND_ENABLED: &str = "AURA_SOUND_ENABLED";
pub const ENV_TEST_DRIVE_VIDEO_URL: &str = "AURA_TEST_DRIVE_VIDEO_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundConfig {
    pub sample_rate: u32,
    /// Whether triggers are audible before the user touches the toggle.
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_drive_video_url: Option<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            sample_rate: 44_100,
            enabled: true,
            test_drive_video_url: None,
        }
    }
}

impl SoundConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SoundConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        SoundConfig::from_json(&text)
    }

    /// Defaults overridden by `AURA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        SoundConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `AURA_*` keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = SoundConfig::default();

        if let Some(raw) = lookup(ENV_SAMPLE_RATE) {
            config.sample_rate = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_SAMPLE_RATE, &raw))?;
        }
        if let Some(raw) = lookup(ENV_SOUND_ENABLED) {
            config.enabled = parse_flag(&raw).ok_or_else(|| invalid(ENV_SOUND_ENABLED, &raw))?;
        }
        if let Some(raw) = lookup(ENV_TEST_DRIVE_VIDEO_URL) {
            let url = raw.trim();
            if !url.is_empty() {
                config.test_drive_video_url = Some(url.to_string());
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !sample_rate_in_range(self.sample_rate) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
