use serde::Deserialize;

use crate::shared::constants::DEFAULT_MIN_SEGMENT_LENGTH;

/// Toggles for the cleanup filter chain.
///
/// Immutable once constructed and passed explicitly into the cleaner;
/// there is no global cleanup state. The default enables every filter;
/// [`CleanupConfig::disabled`] turns the chain into a passthrough for
/// raw/debug output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub remove_duplicates: bool,
    pub remove_fillers: bool,
    pub remove_hallucinations: bool,
    pub remove_non_english: bool,
    /// Minimum trimmed character count; 0 disables the length filter.
    pub min_segment_length: usize,
}

impl CleanupConfig {
    /// Every filter off: cleanup becomes the identity function.
    pub fn disabled() -> Self {
        Self {
            remove_duplicates: false,
            remove_fillers: false,
            remove_hallucinations: false,
            remove_non_english: false,
            min_segment_length: 0,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        *self == Self::disabled()
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            remove_fillers: true,
            remove_hallucinations: true,
            remove_non_english: true,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = CleanupConfig::default();
        assert!(config.remove_duplicates);
        assert!(config.remove_fillers);
        assert!(config.remove_hallucinations);
        assert!(config.remove_non_english);
        assert_eq!(config.min_segment_length, 3);
        assert!(!config.is_passthrough());
    }

    #[test]
    fn test_disabled_is_passthrough() {
        assert!(CleanupConfig::disabled().is_passthrough());
    }

    #[test]
    fn test_deserialize_partial_json_uses_defaults() {
        let config: CleanupConfig =
            serde_json::from_str(r#"{"remove_fillers": false}"#).unwrap();
        assert!(!config.remove_fillers);
        assert!(config.remove_duplicates);
        assert_eq!(config.min_segment_length, 3);
    }
}
