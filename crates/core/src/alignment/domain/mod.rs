pub mod segment_aligner;
pub mod speaker_segment;
