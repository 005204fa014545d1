pub mod hosted_diarizer;
pub mod request_pacer;
