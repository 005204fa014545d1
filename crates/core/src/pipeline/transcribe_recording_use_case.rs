use std::path::Path;

use crate::alignment::domain::segment_aligner::align;
use crate::alignment::domain::speaker_segment::SpeakerSegment;
use crate::audio::domain::audio_reader::AudioReader;
use crate::cleanup::domain::transcript_cleaner::TranscriptCleaner;
use crate::diarization::domain::diarizer::Diarizer;
use crate::diarization::domain::speaker_bounds::SpeakerBounds;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::stage::{PipelineError, Stage};
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::transcription_backend::SegmentSink;
use crate::transcription::infrastructure::backend_selector::BackendSelector;

/// Orchestrates one transcription run as a strict sequence of stages:
/// extract audio, transcribe, diarize, align, clean. Every stage consumes
/// the full output of the previous one.
///
/// Error boundaries: the GPU-to-CPU fallback lives inside the backend
/// selector, and a diarization failure downgrades the run to unlabeled
/// segments. Everything else stops the run and reports the failing stage,
/// so a transcript is never silently truncated.
pub struct TranscribeRecordingUseCase {
    reader: Box<dyn AudioReader>,
    selector: BackendSelector,
    diarizer: Option<Box<dyn Diarizer>>,
    bounds: SpeakerBounds,
    cleaner: TranscriptCleaner,
    progress: Option<SegmentSink>,
    logger: Box<dyn PipelineLogger>,
}

impl TranscribeRecordingUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        selector: BackendSelector,
        diarizer: Option<Box<dyn Diarizer>>,
        bounds: SpeakerBounds,
        cleaner: TranscriptCleaner,
        progress: Option<SegmentSink>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            selector,
            diarizer,
            bounds,
            cleaner,
            progress,
            logger,
        }
    }

    pub fn run(&mut self, input: &Path) -> Result<Vec<SpeakerSegment>, PipelineError> {
        self.logger.stage_started(Stage::ExtractingAudio);
        let clip = self
            .reader
            .read_audio(input, WHISPER_SAMPLE_RATE)
            .map_err(|e| PipelineError::new(Stage::ExtractingAudio, e))?;
        self.logger
            .stage_finished(Stage::ExtractingAudio, clip.samples().len());

        self.logger.stage_started(Stage::Transcribing);
        let segments = self
            .selector
            .transcribe(&clip, self.progress.as_ref())
            .map_err(|e| PipelineError::new(Stage::Transcribing, e))?;
        self.logger
            .stage_finished(Stage::Transcribing, segments.len());

        // Diarization is optional and never fatal: a failing adapter
        // downgrades the run to unlabeled segments.
        let turns = match &self.diarizer {
            None => {
                self.logger
                    .stage_skipped(Stage::Diarizing, "diarization disabled");
                None
            }
            Some(diarizer) => {
                self.logger.stage_started(Stage::Diarizing);
                match diarizer.diarize(&clip, self.bounds) {
                    Ok(turns) => {
                        self.logger.stage_finished(Stage::Diarizing, turns.len());
                        Some(turns)
                    }
                    Err(e) => {
                        log::warn!(
                            "diarization unavailable ({e}); continuing without speaker labels"
                        );
                        self.logger.info(&format!(
                            "Diarization unavailable ({e}); continuing without speaker labels"
                        ));
                        None
                    }
                }
            }
        };

        let aligned = match turns {
            Some(turns) => {
                self.logger.stage_started(Stage::Aligning);
                let aligned = align(segments, &turns)
                    .map_err(|e| PipelineError::new(Stage::Aligning, e))?;
                self.logger.stage_finished(Stage::Aligning, aligned.len());
                aligned
            }
            None => {
                self.logger
                    .stage_skipped(Stage::Aligning, "no speaker turns");
                segments.into_iter().map(SpeakerSegment::unlabeled).collect()
            }
        };

        self.logger.stage_started(Stage::Cleaning);
        let cleaned = self.cleaner.clean(aligned);
        self.logger.stage_finished(Stage::Cleaning, cleaned.len());

        self.logger.summary();
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_clip::AudioClip;
    use crate::audio::domain::audio_reader::AudioReadError;
    use crate::cleanup::domain::cleanup_config::CleanupConfig;
    use crate::diarization::domain::diarizer::DiarizationError;
    use crate::diarization::domain::speaker_turn::{SpeakerId, SpeakerTurn};
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::pipeline::stage::StageFailure;
    use crate::transcription::domain::transcript_segment::TranscriptSegment;
    use crate::transcription::domain::transcription_backend::{
        TranscriptionBackend, TranscriptionError,
    };
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubReader;

    impl AudioReader for StubReader {
        fn read_audio(
            &self,
            _path: &Path,
            sample_rate: u32,
        ) -> Result<AudioClip, AudioReadError> {
            Ok(AudioClip::new(vec![0.0; sample_rate as usize], sample_rate))
        }
    }

    struct StubBackend {
        segments: Vec<TranscriptSegment>,
        fail: bool,
    }

    impl TranscriptionBackend for StubBackend {
        fn transcribe(
            &self,
            _audio: &AudioClip,
            progress: Option<&SegmentSink>,
        ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
            if self.fail {
                return Err(TranscriptionError::Inference {
                    message: "stub inference failure".to_string(),
                });
            }
            if let Some(sink) = progress {
                for segment in &self.segments {
                    sink(segment);
                }
            }
            Ok(self.segments.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct StubDiarizer {
        result: Result<Vec<SpeakerTurn>, DiarizationError>,
    }

    impl Diarizer for StubDiarizer {
        fn diarize(
            &self,
            _audio: &AudioClip,
            _bounds: SpeakerBounds,
        ) -> Result<Vec<SpeakerTurn>, DiarizationError> {
            match &self.result {
                Ok(turns) => Ok(turns.clone()),
                Err(_) => Err(DiarizationError::Unauthorized),
            }
        }
    }

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 5.0, "hello everyone"),
            TranscriptSegment::new(5.0, 9.0, "welcome to the meeting"),
        ]
    }

    fn selector(segments: Vec<TranscriptSegment>) -> BackendSelector {
        BackendSelector::new(
            None,
            Box::new(StubBackend {
                segments,
                fail: false,
            }),
        )
    }

    fn use_case(
        diarizer: Option<Box<dyn Diarizer>>,
        cleaner: TranscriptCleaner,
    ) -> TranscribeRecordingUseCase {
        TranscribeRecordingUseCase::new(
            Box::new(StubReader),
            selector(segments()),
            diarizer,
            SpeakerBounds::default(),
            cleaner,
            None,
            Box::new(NullPipelineLogger),
        )
    }

    #[test]
    fn test_run_with_diarization_assigns_speakers() {
        let turns = vec![
            SpeakerTurn::new(0.0, 4.0, SpeakerId(1)),
            SpeakerTurn::new(4.0, 9.0, SpeakerId(2)),
        ];
        let mut uc = use_case(
            Some(Box::new(StubDiarizer { result: Ok(turns) })),
            TranscriptCleaner::new(CleanupConfig::disabled()),
        );

        let out = uc.run(Path::new("meeting.mp4")).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].speaker, Some(SpeakerId(1)));
        assert_eq!(out[1].speaker, Some(SpeakerId(2)));
    }

    #[test]
    fn test_diarization_disabled_leaves_segments_unlabeled() {
        let mut uc = use_case(None, TranscriptCleaner::new(CleanupConfig::disabled()));
        let out = uc.run(Path::new("meeting.mp4")).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.speaker.is_none()));
    }

    #[test]
    fn test_diarization_failure_downgrades_instead_of_raising() {
        let mut uc = use_case(
            Some(Box::new(StubDiarizer {
                result: Err(DiarizationError::Unauthorized),
            })),
            TranscriptCleaner::new(CleanupConfig::disabled()),
        );

        let out = uc.run(Path::new("meeting.mp4")).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.speaker.is_none()));
    }

    #[test]
    fn test_transcription_failure_is_fatal_and_names_stage() {
        let mut uc = TranscribeRecordingUseCase::new(
            Box::new(StubReader),
            BackendSelector::new(
                None,
                Box::new(StubBackend {
                    segments: Vec::new(),
                    fail: true,
                }),
            ),
            None,
            SpeakerBounds::default(),
            TranscriptCleaner::new(CleanupConfig::disabled()),
            None,
            Box::new(NullPipelineLogger),
        );

        let err = uc.run(Path::new("meeting.mp4")).unwrap_err();
        assert_eq!(err.stage, Stage::Transcribing);
        assert!(matches!(err.source, StageFailure::Transcription(_)));
    }

    #[test]
    fn test_cleanup_is_applied_to_aligned_output() {
        let noisy = vec![
            TranscriptSegment::new(0.0, 1.0, "um"),
            TranscriptSegment::new(1.0, 5.0, "the actual discussion"),
        ];
        let mut uc = TranscribeRecordingUseCase::new(
            Box::new(StubReader),
            selector(noisy),
            None,
            SpeakerBounds::default(),
            TranscriptCleaner::new(CleanupConfig::default()),
            None,
            Box::new(NullPipelineLogger),
        );

        let out = uc.run(Path::new("meeting.mp4")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "the actual discussion");
    }

    #[test]
    fn test_progress_sink_sees_each_segment() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let sink: SegmentSink = Box::new(move |segment| {
            sink_seen.lock().unwrap().push(segment.text.clone());
        });

        let mut uc = TranscribeRecordingUseCase::new(
            Box::new(StubReader),
            selector(segments()),
            None,
            SpeakerBounds::default(),
            TranscriptCleaner::new(CleanupConfig::disabled()),
            Some(sink),
            Box::new(NullPipelineLogger),
        );

        uc.run(Path::new("meeting.mp4")).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "hello everyone".to_string(),
                "welcome to the meeting".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_transcription_is_not_an_error() {
        let mut uc = TranscribeRecordingUseCase::new(
            Box::new(StubReader),
            selector(Vec::new()),
            None,
            SpeakerBounds::default(),
            TranscriptCleaner::new(CleanupConfig::default()),
            None,
            Box::new(NullPipelineLogger),
        );

        let out = uc.run(Path::new("silent.mp4")).unwrap();
        assert!(out.is_empty());
    }
}
