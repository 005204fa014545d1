pub mod pipeline_logger;
pub mod stage;
pub mod transcribe_recording_use_case;
