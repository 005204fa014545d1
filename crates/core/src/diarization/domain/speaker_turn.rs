use std::fmt;

/// Speaker index assigned in order of first appearance within a run.
///
/// Ids start at 1 and are meaningless across runs or files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeakerId(pub u32);

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Speaker {}", self.0)
    }
}

/// A diarized span: who was talking, and when.
///
/// Turns for the same speaker may be non-contiguous. The diarization
/// model contracts that turns from different speakers don't overlap,
/// but downstream consumers must tolerate small violations.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeakerTurn {
    pub start_time: f64,
    pub end_time: f64,
    pub speaker: SpeakerId,
}

impl SpeakerTurn {
    pub fn new(start_time: f64, end_time: f64, speaker: SpeakerId) -> Self {
        Self {
            start_time,
            end_time,
            speaker,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// True if `time` falls inside `[start_time, end_time)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_id_display() {
        assert_eq!(SpeakerId(1).to_string(), "Speaker 1");
        assert_eq!(SpeakerId(12).to_string(), "Speaker 12");
    }

    #[test]
    fn test_contains_is_half_open() {
        let turn = SpeakerTurn::new(1.0, 2.0, SpeakerId(1));
        assert!(turn.contains(1.0));
        assert!(turn.contains(1.5));
        assert!(!turn.contains(2.0));
        assert!(!turn.contains(0.5));
    }
}
