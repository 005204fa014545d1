use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::WHISPER_MODEL_BASE_URL;
use crate::transcription::domain::model_size::ModelSize;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve the ggml weights file for a model size, checking local
/// locations before downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled path (for pre-downloaded model collections)
/// 3. Download from Hugging Face to cache
pub fn resolve(
    model: ModelSize,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let name = model.ggml_file_name();

    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    let url = format!("{WHISPER_MODEL_BASE_URL}{name}");
    download(&url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/meetscribe/models/`
/// - Linux: `$XDG_CACHE_HOME/meetscribe/models/` or `~/.cache/meetscribe/models/`
/// - Windows: `%LOCALAPPDATA%/meetscribe/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("meetscribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("meetscribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Report progress in chunks to avoid excessive callbacks
    let chunk_size = 1024 * 1024;
    for chunk in bytes.chunks(chunk_size) {
        file.write_all(chunk)
            .map_err(|e| ModelResolveError::Write {
                path: temp_path.clone(),
                source: e,
            })?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
