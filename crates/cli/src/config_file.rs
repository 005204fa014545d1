use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use meetscribe_core::cleanup::domain::cleanup_config::CleanupConfig;

/// Optional JSON configuration. Missing keys fall back to defaults and
/// CLI flags override whatever the file says.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub diarization_token: Option<String>,
    pub diarization_endpoint: Option<String>,
    pub min_speakers: Option<u32>,
    pub max_speakers: Option<u32>,
    pub whisper_cli_exe: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub cleanup: CleanupConfig,
}

/// Load configuration from an explicit path, or from the default
/// location (`<user config dir>/meetscribe/config.json`) when present.
///
/// An explicit path that doesn't exist or doesn't parse is an error; a
/// missing default file just means defaults.
pub fn load(explicit: Option<&Path>) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(ConfigFile::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    let config: ConfigFile = serde_json::from_str(&content)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("meetscribe").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = load(Some(Path::new("/nonexistent/config.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(config.model.is_none());
        assert!(config.diarization_token.is_none());
        assert_eq!(config.cleanup, CleanupConfig::default());
    }

    #[test]
    fn test_nested_cleanup_section() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "model": "medium",
                "min_speakers": 3,
                "cleanup": {"remove_fillers": false, "min_segment_length": 5}
            }"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.model.as_deref(), Some("medium"));
        assert_eq!(config.min_speakers, Some(3));
        assert!(!config.cleanup.remove_fillers);
        assert!(config.cleanup.remove_duplicates);
        assert_eq!(config.cleanup.min_segment_length, 5);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
