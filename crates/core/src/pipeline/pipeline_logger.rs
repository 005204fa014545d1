use std::time::Instant;

use crate::pipeline::stage::Stage;

/// Cross-cutting observer for pipeline orchestration events.
///
/// Decouples the use case from specific output mechanisms (stdout, GUI
/// signals, log crate) so callers can watch a run without changing the
/// orchestration code. Observational only: nothing reported here feeds
/// back into control flow.
pub trait PipelineLogger: Send {
    /// A stage is about to run.
    fn stage_started(&mut self, stage: Stage);

    /// A stage finished, producing `items` elements.
    fn stage_finished(&mut self, stage: Stage, items: usize);

    /// A stage was skipped entirely (e.g. diarization disabled).
    fn stage_skipped(&mut self, stage: Stage, reason: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests and by callers
/// with their own progress reporting.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage_started(&mut self, _stage: Stage) {}
    fn stage_finished(&mut self, _stage: Stage, _items: usize) {}
    fn stage_skipped(&mut self, _stage: Stage, _reason: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: announces stages on stderr as they run and
/// reports per-stage durations at the end of the run.
pub struct StderrPipelineLogger {
    start_time: Instant,
    current: Option<(Stage, Instant)>,
    finished: Vec<(Stage, f64, usize)>,
}

impl StderrPipelineLogger {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            current: None,
            finished: Vec::new(),
        }
    }

    /// Formatted summary, or `None` if no stage ever finished.
    pub fn summary_string(&self) -> Option<String> {
        if self.finished.is_empty() {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!("Pipeline summary ({elapsed:.1}s total):")];
        for (stage, secs, items) in &self.finished {
            lines.push(format!("  {stage:18} {secs:6.1}s  ({items} items)"));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StderrPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StderrPipelineLogger {
    fn stage_started(&mut self, stage: Stage) {
        eprintln!("Running {stage}...");
        self.current = Some((stage, Instant::now()));
    }

    fn stage_finished(&mut self, stage: Stage, items: usize) {
        let secs = match self.current.take() {
            Some((started_stage, started_at)) if started_stage == stage => {
                started_at.elapsed().as_secs_f64()
            }
            _ => 0.0,
        };
        self.finished.push((stage, secs, items));
    }

    fn stage_skipped(&mut self, stage: Stage, reason: &str) {
        eprintln!("Skipping {stage}: {reason}");
    }

    fn info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn summary(&self) {
        if let Some(summary) = self.summary_string() {
            eprintln!("{summary}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_accepts_all_events() {
        let mut logger = NullPipelineLogger;
        logger.stage_started(Stage::Transcribing);
        logger.stage_finished(Stage::Transcribing, 10);
        logger.stage_skipped(Stage::Diarizing, "disabled");
        logger.info("message");
        logger.summary();
    }

    #[test]
    fn test_summary_none_before_any_stage() {
        let logger = StderrPipelineLogger::new();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_summary_lists_finished_stages() {
        let mut logger = StderrPipelineLogger::new();
        logger.stage_started(Stage::Transcribing);
        logger.stage_finished(Stage::Transcribing, 42);
        logger.stage_started(Stage::Cleaning);
        logger.stage_finished(Stage::Cleaning, 40);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("transcription"));
        assert!(summary.contains("42 items"));
        assert!(summary.contains("cleanup"));
    }

    #[test]
    fn test_mismatched_finish_records_zero_duration() {
        let mut logger = StderrPipelineLogger::new();
        logger.stage_finished(Stage::Aligning, 5);
        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("alignment"));
    }
}
