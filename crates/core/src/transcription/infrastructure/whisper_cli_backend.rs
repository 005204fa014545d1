use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::infrastructure::wav::write_wav;
use crate::transcription::domain::transcript_segment::TranscriptSegment;
use crate::transcription::domain::transcription_backend::{
    SegmentSink, TranscriptionBackend, TranscriptionError,
};

/// GPU-accelerated transcription through an external whisper.cpp CLI build.
///
/// whisper.cpp prints one line per segment:
/// `[00:00:00.000 --> 00:00:07.620]   text here`
/// Lines are parsed as they stream, so callers see partial transcripts
/// while inference is still running.
pub struct WhisperCliBackend {
    executable: PathBuf,
    model_path: PathBuf,
    language: String,
}

impl WhisperCliBackend {
    pub fn new(executable: PathBuf, model_path: PathBuf, language: impl Into<String>) -> Self {
        Self {
            executable,
            model_path,
            language: language.into(),
        }
    }

    fn check_available(&self) -> Result<(), TranscriptionError> {
        if !self.executable.exists() {
            return Err(TranscriptionError::BackendUnavailable {
                backend: self.name().to_string(),
                reason: format!("executable not found at {}", self.executable.display()),
            });
        }
        if !self.model_path.exists() {
            return Err(TranscriptionError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }
        Ok(())
    }
}

impl TranscriptionBackend for WhisperCliBackend {
    fn transcribe(
        &self,
        audio: &AudioClip,
        progress: Option<&SegmentSink>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        self.check_available()?;

        // whisper.cpp wants a WAV file; stage the decoded clip in a temp
        // file that is removed on every exit path.
        let wav_file = tempfile::Builder::new()
            .prefix("meetscribe-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| TranscriptionError::AudioStaging(Box::new(e)))?;
        write_wav(audio, wav_file.path())
            .map_err(|e| TranscriptionError::AudioStaging(Box::new(e)))?;

        let mut child = Command::new(&self.executable)
            .arg("-m")
            .arg(&self.model_path)
            .arg("-f")
            .arg(wav_file.path())
            .arg("-l")
            .arg(&self.language)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(TranscriptionError::Launch)?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                return Err(TranscriptionError::Launch(std::io::Error::other(
                    "child stdout was not captured",
                )))
            }
        };
        let mut segments = Vec::new();

        for line in BufReader::new(stdout).lines() {
            let line = line.map_err(TranscriptionError::Launch)?;
            if !looks_like_segment_line(&line) {
                continue;
            }
            let segment = parse_segment_line(&line)?;
            if let Some(segment) = segment {
                if let Some(sink) = progress {
                    sink(&segment);
                }
                segments.push(segment);
            }
        }

        let status = child.wait().map_err(TranscriptionError::Launch)?;
        if !status.success() {
            return Err(TranscriptionError::ProcessFailed { status });
        }

        Ok(segments)
    }

    fn name(&self) -> &str {
        "whisper.cpp (GPU)"
    }
}

/// A transcript line starts with a bracketed timestamp range.
fn looks_like_segment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('[') && trimmed.contains("-->")
}

/// Parse `[HH:MM:SS.mmm --> HH:MM:SS.mmm]   text`.
///
/// Returns `Ok(None)` for segment lines with empty text; an unparsable
/// timestamp range is malformed output, not silently skippable.
fn parse_segment_line(line: &str) -> Result<Option<TranscriptSegment>, TranscriptionError> {
    let malformed = || TranscriptionError::MalformedOutput {
        line: line.to_string(),
    };

    let trimmed = line.trim_start();
    let close = trimmed.find(']').ok_or_else(malformed)?;
    let range = &trimmed[1..close];
    let (start_str, end_str) = range.split_once("-->").ok_or_else(malformed)?;

    let start = parse_timestamp(start_str.trim()).ok_or_else(malformed)?;
    let end = parse_timestamp(end_str.trim()).ok_or_else(malformed)?;

    let text = trimmed[close + 1..].trim();
    if text.is_empty() || end <= start {
        return Ok(None);
    }

    Ok(Some(TranscriptSegment::new(start, end, text)))
}

/// Parse `HH:MM:SS.mmm` into seconds.
fn parse_timestamp(ts: &str) -> Option<f64> {
    let mut parts = ts.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}
