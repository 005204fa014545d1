use thiserror::Error;

/// Invalid configuration detected before any backend or model is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown model size '{name}' (valid: tiny, base, small, medium, large-v3, turbo)")]
    UnknownModel { name: String },
    #[error("speaker bounds must satisfy 1 <= min <= max, got min={min} max={max}")]
    InvalidSpeakerBounds { min: u32, max: u32 },
    #[error("diarization endpoint must be an http(s) URL, got '{endpoint}'")]
    InvalidEndpoint { endpoint: String },
}
