use crate::diarization::domain::speaker_turn::SpeakerId;
use crate::transcription::domain::transcript_segment::TranscriptSegment;

/// A transcript segment enriched with an assigned speaker.
///
/// The speaker is assigned exactly once, at alignment time; cleanup and
/// formatting never re-derive it. `speaker` is `None` when diarization
/// was disabled or no turn overlapped the segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeakerSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub confidence: Option<f32>,
    pub speaker: Option<SpeakerId>,
}

impl SpeakerSegment {
    pub fn new(segment: TranscriptSegment, speaker: Option<SpeakerId>) -> Self {
        Self {
            start_time: segment.start_time,
            end_time: segment.end_time,
            text: segment.text,
            confidence: segment.confidence,
            speaker,
        }
    }

    /// Wrap a segment with no speaker attribution (diarization skipped).
    pub fn unlabeled(segment: TranscriptSegment) -> Self {
        Self::new(segment, None)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn speaker_label(&self) -> Option<String> {
        self.speaker.map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabeled_preserves_segment_fields() {
        let seg = TranscriptSegment::new(1.0, 2.0, "hello").with_confidence(0.9);
        let out = SpeakerSegment::unlabeled(seg);
        assert_eq!(out.start_time, 1.0);
        assert_eq!(out.end_time, 2.0);
        assert_eq!(out.text, "hello");
        assert_eq!(out.confidence, Some(0.9));
        assert_eq!(out.speaker, None);
        assert_eq!(out.speaker_label(), None);
    }

    #[test]
    fn test_speaker_label_formatting() {
        let seg = TranscriptSegment::new(0.0, 1.0, "hi");
        let out = SpeakerSegment::new(seg, Some(SpeakerId(2)));
        assert_eq!(out.speaker_label().unwrap(), "Speaker 2");
    }
}
