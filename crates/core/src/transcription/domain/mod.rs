pub mod model_size;
pub mod transcript_segment;
pub mod transcription_backend;
