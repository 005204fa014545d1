pub mod cleanup_config;
pub mod cleanup_tables;
pub mod transcript_cleaner;
