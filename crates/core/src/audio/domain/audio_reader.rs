use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::audio::domain::audio_clip::AudioClip;

#[derive(Error, Debug)]
pub enum AudioReadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("{path} has no audio track")]
    NoAudioTrack { path: PathBuf },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ffmpeg_next::Error,
    },
}

/// Domain interface for decoding the audio track of a recording.
pub trait AudioReader: Send {
    /// Decode the audio track to mono PCM at the given sample rate.
    fn read_audio(&self, path: &Path, target_sample_rate: u32)
        -> Result<AudioClip, AudioReadError>;
}
