use std::fmt;
use std::str::FromStr;

use crate::shared::config_error::ConfigError;

/// Whisper model size. Validated before any backend is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    LargeV3,
    Turbo,
}

impl ModelSize {
    pub const ALL: &[ModelSize] = &[
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::LargeV3,
        ModelSize::Turbo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::LargeV3 => "large-v3",
            ModelSize::Turbo => "turbo",
        }
    }

    /// ggml weights file for this size.
    ///
    /// `large-v3` maps to the turbo weights: same accuracy tier,
    /// substantially faster on both backends.
    pub fn ggml_file_name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::LargeV3 | ModelSize::Turbo => "ggml-large-v3-turbo.bin",
        }
    }
}

impl FromStr for ModelSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large-v3" => Ok(ModelSize::LargeV3),
            "turbo" => Ok(ModelSize::Turbo),
            other => Err(ConfigError::UnknownModel {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
