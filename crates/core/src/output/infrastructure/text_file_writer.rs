use std::fs;
use std::path::Path;

use crate::alignment::domain::speaker_segment::SpeakerSegment;
use crate::output::domain::transcript_formatter::grouped_lines;
use crate::output::domain::transcript_writer::{OutputError, TranscriptWriter};

/// Writes the transcript as plain UTF-8 text, grouped by speaker.
pub struct TextFileWriter;

impl TranscriptWriter for TextFileWriter {
    fn write(&self, path: &Path, segments: &[SpeakerSegment]) -> Result<(), OutputError> {
        let content = grouped_lines(segments).join("\n");
        fs::write(path, content).map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
