use crate::audio::domain::audio_clip::AudioClip;
use crate::transcription::domain::transcript_segment::TranscriptSegment;
use crate::transcription::domain::transcription_backend::{
    SegmentSink, TranscriptionBackend, TranscriptionError,
};

/// Runs the preferred backend and falls back to the secondary exactly once.
///
/// With `force_cpu` callers simply construct the selector without a
/// primary. Any primary failure — unavailable executable, missing model,
/// process exit, malformed output — triggers the single fallback attempt;
/// if that also fails, the error carries the root cause of the last
/// attempted backend.
pub struct BackendSelector {
    primary: Option<Box<dyn TranscriptionBackend>>,
    fallback: Box<dyn TranscriptionBackend>,
}

impl BackendSelector {
    pub fn new(
        primary: Option<Box<dyn TranscriptionBackend>>,
        fallback: Box<dyn TranscriptionBackend>,
    ) -> Self {
        Self { primary, fallback }
    }

    pub fn transcribe(
        &self,
        audio: &AudioClip,
        progress: Option<&SegmentSink>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        if let Some(ref primary) = self.primary {
            log::info!("Transcribing with {}", primary.name());
            match primary.transcribe(audio, progress) {
                Ok(segments) => return Ok(segments),
                Err(e) => {
                    log::warn!(
                        "{} failed ({e}), falling back to {}",
                        primary.name(),
                        self.fallback.name()
                    );
                }
            }
        } else {
            log::info!("Transcribing with {}", self.fallback.name());
        }

        self.fallback
            .transcribe(audio, progress)
            .map_err(|e| TranscriptionError::BackendsExhausted {
                backend: self.fallback.name().to_string(),
                source: Box::new(e),
            })
    }

    /// Name of the backend that would be attempted first.
    pub fn preferred_name(&self) -> &str {
        self.primary
            .as_deref()
            .map_or_else(|| self.fallback.name(), TranscriptionBackend::name)
    }
}
