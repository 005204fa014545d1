use std::fmt;

use thiserror::Error;

use crate::alignment::domain::segment_aligner::AlignmentError;
use crate::audio::domain::audio_reader::AudioReadError;
use crate::transcription::domain::transcription_backend::TranscriptionError;

/// Pipeline stages, in execution order. Each stage consumes the entire
/// output of the previous one; there is no streaming across stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ExtractingAudio,
    Transcribing,
    Diarizing,
    Aligning,
    Cleaning,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ExtractingAudio => "audio extraction",
            Stage::Transcribing => "transcription",
            Stage::Diarizing => "diarization",
            Stage::Aligning => "alignment",
            Stage::Cleaning => "cleanup",
        };
        f.write_str(name)
    }
}

/// A fatal stage failure. Diarization errors never appear here: the
/// orchestrator downgrades them to an unlabeled run instead.
#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StageFailure,
}

#[derive(Error, Debug)]
pub enum StageFailure {
    #[error(transparent)]
    Audio(#[from] AudioReadError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

impl PipelineError {
    pub fn new(stage: Stage, source: impl Into<StageFailure>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_message_names_the_stage() {
        let err = PipelineError::new(
            Stage::Transcribing,
            TranscriptionError::ModelNotFound {
                path: PathBuf::from("/models/ggml-tiny.bin"),
            },
        );
        let message = err.to_string();
        assert!(message.contains("transcription"));
    }

    #[test]
    fn test_source_chain_reaches_root_cause() {
        let err = PipelineError::new(
            Stage::Aligning,
            AlignmentError::UnsortedSegments { index: 3 },
        );
        let source = std::error::Error::source(&err).expect("has source");
        assert!(source.to_string().contains("index 3"));
    }
}
