/// A transcribed span of speech with timing.
///
/// Produced by a transcription backend; immutable once created. Backends
/// contract to emit segments ordered by `start_time`, non-overlapping.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub confidence: Option<f32>,
}

impl TranscriptSegment {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn midpoint(&self) -> f64 {
        (self.start_time + self.end_time) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_fields() {
        let seg = TranscriptSegment::new(1.0, 2.5, "hello").with_confidence(0.95);
        assert_eq!(seg.text, "hello");
        assert_eq!(seg.start_time, 1.0);
        assert_eq!(seg.end_time, 2.5);
        assert_eq!(seg.confidence, Some(0.95));
    }

    #[test]
    fn test_duration_and_midpoint() {
        let seg = TranscriptSegment::new(2.0, 2.8, "test");
        assert_relative_eq!(seg.duration(), 0.8, epsilon = 0.001);
        assert_relative_eq!(seg.midpoint(), 2.4, epsilon = 0.001);
    }
}
