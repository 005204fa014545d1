use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::infrastructure::wav::encode_wav;
use crate::diarization::domain::diarizer::{DiarizationError, DiarizationToken, Diarizer};
use crate::diarization::domain::speaker_bounds::SpeakerBounds;
use crate::diarization::domain::speaker_turn::{SpeakerId, SpeakerTurn};
use crate::diarization::infrastructure::request_pacer::RequestPacer;
use crate::shared::config_error::ConfigError;
use crate::shared::constants::DIARIZATION_REQUEST_INTERVAL_MS;

const REQUEST_TIMEOUT_SECS: u64 = 600;

/// Speaker diarization through a hosted neural diarization API.
///
/// Uploads the decoded audio as WAV and receives raw speaker turns. The
/// HTTP client lives only for the duration of one call, so the connection
/// is released on every exit path. Requests are paced client-side; a
/// throttled response fails the call instead of retrying.
pub struct HostedDiarizer {
    endpoint: String,
    token: DiarizationToken,
    pacer: Mutex<RequestPacer>,
}

impl HostedDiarizer {
    pub fn new(endpoint: impl Into<String>, token: DiarizationToken) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint { endpoint });
        }
        Ok(Self {
            endpoint,
            token,
            pacer: Mutex::new(RequestPacer::new(Duration::from_millis(
                DIARIZATION_REQUEST_INTERVAL_MS,
            ))),
        })
    }
}

impl Diarizer for HostedDiarizer {
    fn diarize(
        &self,
        audio: &AudioClip,
        bounds: SpeakerBounds,
    ) -> Result<Vec<SpeakerTurn>, DiarizationError> {
        let wav_bytes =
            encode_wav(audio).map_err(|e| DiarizationError::AudioStaging(Box::new(e)))?;

        if let Ok(mut pacer) = self.pacer.lock() {
            pacer.wait();
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(DiarizationError::Transport)?;

        let response = client
            .post(&self.endpoint)
            .bearer_auth(self.token.reveal())
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .query(&[
                ("min_speakers", bounds.min()),
                ("max_speakers", bounds.max()),
            ])
            .body(wav_bytes)
            .send()
            .map_err(DiarizationError::Transport)?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => return Err(DiarizationError::Unauthorized),
            429 => return Err(DiarizationError::Throttled),
            _ if !status.is_success() => {
                return Err(DiarizationError::Rejected {
                    status: status.as_u16(),
                })
            }
            _ => {}
        }

        let body = response.text().map_err(DiarizationError::Transport)?;
        let raw: RawDiarization =
            serde_json::from_str(&body).map_err(|e| DiarizationError::MalformedResponse {
                message: e.to_string(),
            })?;

        Ok(assign_speaker_ids(raw.turns))
    }
}

#[derive(Debug, Deserialize)]
struct RawDiarization {
    turns: Vec<RawTurn>,
}

#[derive(Debug, Deserialize)]
struct RawTurn {
    start: f64,
    end: f64,
    speaker: String,
}

/// Sort raw turns by start time and map provider labels (`SPEAKER_00`,
/// `SPEAKER_01`, ...) to ids numbered from 1 in order of first
/// appearance. Degenerate turns with no duration are discarded.
fn assign_speaker_ids(mut raw: Vec<RawTurn>) -> Vec<SpeakerTurn> {
    raw.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut labels: HashMap<String, SpeakerId> = HashMap::new();
    let mut next_id = 1u32;
    let mut turns = Vec::with_capacity(raw.len());

    for turn in raw {
        if turn.end <= turn.start {
            log::warn!(
                "discarding degenerate diarization turn [{:.2}, {:.2}]",
                turn.start,
                turn.end
            );
            continue;
        }
        let speaker = *labels.entry(turn.speaker).or_insert_with(|| {
            let id = SpeakerId(next_id);
            next_id += 1;
            id
        });
        turns.push(SpeakerTurn::new(turn.start, turn.end, speaker));
    }

    turns
}
