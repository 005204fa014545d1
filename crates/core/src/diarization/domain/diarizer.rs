use std::fmt;

use thiserror::Error;

use crate::audio::domain::audio_clip::AudioClip;
use crate::diarization::domain::speaker_bounds::SpeakerBounds;
use crate::diarization::domain::speaker_turn::SpeakerTurn;

/// Diarization is never fatal to a run: the orchestrator catches any of
/// these and downgrades to an unlabeled transcript.
#[derive(Error, Debug)]
pub enum DiarizationError {
    #[error("no diarization credential configured")]
    MissingCredential,
    #[error("diarization service rejected the credential")]
    Unauthorized,
    #[error("diarization service is throttling requests")]
    Throttled,
    #[error("diarization request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("diarization service returned HTTP {status}")]
    Rejected { status: u16 },
    #[error("could not parse diarization response: {message}")]
    MalformedResponse { message: String },
    #[error("failed to stage audio for diarization: {0}")]
    AudioStaging(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Access token for the diarization service.
///
/// A distinct type so a token can't be passed where ordinary text is
/// expected; Debug output never reveals the value.
#[derive(Clone)]
pub struct DiarizationToken(String);

impl DiarizationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DiarizationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiarizationToken(***)")
    }
}

/// Domain interface for speaker diarization.
///
/// Implementations contract to return turns ordered by `start_time`,
/// with speaker ids numbered from 1 in order of first appearance.
/// An empty sequence is a valid result.
pub trait Diarizer: Send {
    fn diarize(
        &self,
        audio: &AudioClip,
        bounds: SpeakerBounds,
    ) -> Result<Vec<SpeakerTurn>, DiarizationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = DiarizationToken::new("hf_secret_value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_token_reveal_returns_value() {
        let token = DiarizationToken::new("hf_abc");
        assert_eq!(token.reveal(), "hf_abc");
    }
}
