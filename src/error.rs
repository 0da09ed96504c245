use thiserror::Error;

/// Errors raised while building, validating or rendering sound programs.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid envelope for {param}: {reason}")]
    InvalidEnvelope { param: String, reason: String },
    #[error("invalid sound program: {0}")]
    InvalidProgram(String),
    #[error("unknown sound profile '{0}'")]
    UnknownProfile(String),
    #[error("sample rate {0} is outside 3000..=768000 Hz")]
    InvalidSampleRate(u32),
    #[error("audio backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Errors raised while loading a [`SoundConfig`](crate::config::SoundConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
    #[error("sample rate {0} is outside 3000..=768000 Hz")]
    InvalidSampleRate(u32),
}

impl SynthError {
    pub(crate) fn envelope(param: &str, reason: impl Into<String>) -> Self {
        SynthError::InvalidEnvelope {
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}
