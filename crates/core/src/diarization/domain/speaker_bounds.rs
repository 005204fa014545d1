use crate::shared::config_error::ConfigError;
use crate::shared::constants::{DEFAULT_MAX_SPEAKERS, DEFAULT_MIN_SPEAKERS};

/// Expected speaker-count range handed to the diarization model.
///
/// These are hints: the model may find more or fewer distinct speakers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeakerBounds {
    min: u32,
    max: u32,
}

impl SpeakerBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, ConfigError> {
        if min < 1 || max < min {
            return Err(ConfigError::InvalidSpeakerBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for SpeakerBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SPEAKERS,
            max: DEFAULT_MAX_SPEAKERS,
        }
    }
}
