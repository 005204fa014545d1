/// Sample rate Whisper models expect; audio is decoded/resampled to this.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Base URL for ggml Whisper model downloads.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/";

pub const DEFAULT_MIN_SPEAKERS: u32 = 2;
pub const DEFAULT_MAX_SPEAKERS: u32 = 6;

/// Segments with fewer trimmed characters than this are dropped by cleanup.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 3;

/// Minimum spacing between requests to the hosted diarization API.
pub const DIARIZATION_REQUEST_INTERVAL_MS: u64 = 1000;

/// Hosted diarization endpoint used when none is configured.
pub const DEFAULT_DIARIZATION_ENDPOINT: &str = "https://api.pyannote.ai/v1/diarize";
