use std::path::PathBuf;

use thiserror::Error;

use crate::audio::domain::audio_clip::AudioClip;
use crate::transcription::domain::transcript_segment::TranscriptSegment;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },
    #[error("model weights not found at {path}")]
    ModelNotFound { path: PathBuf },
    #[error("failed to launch transcription process: {0}")]
    Launch(#[source] std::io::Error),
    #[error("transcription process exited with {status}")]
    ProcessFailed { status: std::process::ExitStatus },
    #[error("could not parse transcription output line: {line:?}")]
    MalformedOutput { line: String },
    #[error("failed to stage audio for transcription: {0}")]
    AudioStaging(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("inference failed: {message}")]
    Inference { message: String },
    #[error("all transcription backends failed; last ({backend}): {source}")]
    BackendsExhausted {
        backend: String,
        #[source]
        source: Box<TranscriptionError>,
    },
}

/// Callback invoked with each segment as the backend produces it.
///
/// Observational only: backends never let the sink affect control flow.
pub type SegmentSink = Box<dyn Fn(&TranscriptSegment) + Send>;

/// Domain interface for speech-to-text transcription.
///
/// Implementations contract to return segments ordered by `start_time`,
/// non-overlapping, with non-empty trimmed text. An empty sequence is a
/// valid result for silent audio.
pub trait TranscriptionBackend: Send {
    fn transcribe(
        &self,
        audio: &AudioClip,
        progress: Option<&SegmentSink>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError>;

    /// Human-readable backend name for logs and error reports.
    fn name(&self) -> &str;
}
