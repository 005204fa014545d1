use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::alignment::domain::speaker_segment::SpeakerSegment;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write transcript to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for persisting a finished transcript.
///
/// Implementations receive the final segment sequence and must not
/// reorder it.
pub trait TranscriptWriter: Send {
    fn write(&self, path: &Path, segments: &[SpeakerSegment]) -> Result<(), OutputError>;
}
