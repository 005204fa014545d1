pub mod transcript_formatter;
pub mod transcript_writer;
