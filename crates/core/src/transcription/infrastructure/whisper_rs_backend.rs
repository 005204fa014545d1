use std::path::PathBuf;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_clip::AudioClip;
use crate::transcription::domain::transcript_segment::TranscriptSegment;
use crate::transcription::domain::transcription_backend::{
    SegmentSink, TranscriptionBackend, TranscriptionError,
};

/// CPU transcription using whisper.cpp in-process via whisper-rs.
///
/// The fallback backend: slower than the GPU CLI but needs nothing beyond
/// the model weights.
pub struct WhisperRsBackend {
    model_path: PathBuf,
    language: String,
}

impl WhisperRsBackend {
    pub fn new(model_path: PathBuf, language: impl Into<String>) -> Self {
        Self {
            model_path,
            language: language.into(),
        }
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }
}

impl TranscriptionBackend for WhisperRsBackend {
    fn transcribe(
        &self,
        audio: &AudioClip,
        progress: Option<&SegmentSink>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        if !self.model_path.exists() {
            return Err(TranscriptionError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        let model_path =
            self.model_path
                .to_str()
                .ok_or_else(|| TranscriptionError::BackendUnavailable {
                    backend: self.name().to_string(),
                    reason: "model path is not valid UTF-8".to_string(),
                })?;

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| TranscriptionError::Inference {
                message: format!("failed to load model: {e}"),
            })?;

        let mut state = ctx
            .create_state()
            .map_err(|e| TranscriptionError::Inference {
                message: format!("failed to create state: {e}"),
            })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some(&self.language));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| TranscriptionError::Inference {
                message: format!("inference failed: {e}"),
            })?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = segment.to_string().trim().to_string();
            if text.is_empty() {
                continue;
            }

            // Segment timestamps are in centiseconds (10ms units)
            let start_time = segment.start_timestamp() as f64 / 100.0;
            let end_time = segment.end_timestamp() as f64 / 100.0;
            if end_time <= start_time {
                continue;
            }

            // Mean probability over the segment's non-special tokens.
            let n_tokens = segment.n_tokens();
            let mut prob_sum = 0.0f32;
            let mut prob_count = 0usize;
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };
                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }
                prob_sum += token.token_probability();
                prob_count += 1;
            }

            let mut out = TranscriptSegment::new(start_time, end_time, text);
            if prob_count > 0 {
                out = out.with_confidence(prob_sum / prob_count as f32);
            }

            if let Some(sink) = progress {
                sink(&out);
            }
            segments.push(out);
        }

        Ok(segments)
    }

    fn name(&self) -> &str {
        "whisper-rs (CPU)"
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
