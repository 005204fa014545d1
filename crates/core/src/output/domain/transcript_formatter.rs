use crate::alignment::domain::speaker_segment::SpeakerSegment;

/// Render seconds as `HH:MM:SS`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// One console line per segment:
/// `[HH:MM:SS -> HH:MM:SS] Speaker N: text` (speaker omitted when
/// unassigned). Input order is preserved exactly.
pub fn console_line(segment: &SpeakerSegment) -> String {
    let timestamp = format!(
        "[{} -> {}]",
        format_timestamp(segment.start_time),
        format_timestamp(segment.end_time)
    );
    match segment.speaker_label() {
        Some(label) => format!("{timestamp} {label}: {}", segment.text.trim()),
        None => format!("{timestamp} {}", segment.text.trim()),
    }
}

/// File rendering: lines grouped by speaker, with a blank line between
/// speaker changes so the transcript reads as dialogue.
pub fn grouped_lines(segments: &[SpeakerSegment]) -> Vec<String> {
    let mut lines = Vec::with_capacity(segments.len());
    let mut prev_label: Option<Option<String>> = None;

    for segment in segments {
        let label = segment.speaker_label();
        if let Some(ref prev) = prev_label {
            if *prev != label {
                lines.push(String::new());
            }
        }
        match &label {
            Some(speaker) => lines.push(format!("{speaker}: {}", segment.text.trim())),
            None => lines.push(segment.text.trim().to_string()),
        }
        prev_label = Some(label);
    }

    lines
}
