pub mod backend_selector;
pub mod whisper_cli_backend;
pub mod whisper_rs_backend;
