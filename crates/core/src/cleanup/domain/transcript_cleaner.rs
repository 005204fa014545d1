use crate::alignment::domain::speaker_segment::SpeakerSegment;
use crate::cleanup::domain::cleanup_config::CleanupConfig;
use crate::cleanup::domain::cleanup_tables::{normalize, CleanupTables};

/// A denylist phrase found inside a longer segment only counts when it
/// makes up at least this share of the segment's characters; below that
/// the phrase is a substring of an otherwise-meaningful sentence.
const HALLUCINATION_CONTAINMENT: f64 = 0.8;

/// Order-preserving filter chain over speaker segments.
///
/// Filters run in a fixed order — duplicates, hallucinations, non-target
/// text, fillers, minimum length — because later filters see the already
/// reduced sequence (what counts as "consecutive duplicate" changes as
/// segments drop out). Filters only ever drop segments: times, speaker,
/// and stored text of survivors are untouched; normalization exists only
/// for comparisons.
pub struct TranscriptCleaner {
    config: CleanupConfig,
    tables: CleanupTables,
}

impl TranscriptCleaner {
    pub fn new(config: CleanupConfig) -> Self {
        Self::with_tables(config, CleanupTables::default())
    }

    pub fn with_tables(config: CleanupConfig, tables: CleanupTables) -> Self {
        Self { config, tables }
    }

    pub fn config(&self) -> &CleanupConfig {
        &self.config
    }

    pub fn clean(&self, segments: Vec<SpeakerSegment>) -> Vec<SpeakerSegment> {
        let mut kept = segments;

        if self.config.remove_duplicates {
            kept = drop_consecutive_duplicates(kept);
        }
        if self.config.remove_hallucinations {
            kept.retain(|s| !self.is_hallucination(&s.text));
        }
        if self.config.remove_non_english {
            kept.retain(|s| self.has_target_content(&s.text));
        }
        if self.config.remove_fillers {
            kept.retain(|s| !self.is_only_fillers(&s.text));
        }
        if self.config.min_segment_length > 0 {
            kept.retain(|s| s.text.trim().chars().count() >= self.config.min_segment_length);
        }

        kept
    }

    /// Whole-text match against the denylist, or a denylist phrase
    /// occupying nearly the whole segment.
    fn is_hallucination(&self, text: &str) -> bool {
        let norm = normalize(text);
        if norm.is_empty() {
            return false;
        }
        self.tables.hallucinations().iter().any(|phrase| {
            if norm == *phrase {
                return true;
            }
            norm.contains(phrase.as_str())
                && phrase.chars().count() as f64 / norm.chars().count() as f64
                    >= HALLUCINATION_CONTAINMENT
        })
    }

    /// True if anything alphanumeric survives stripping characters
    /// outside the target script.
    fn has_target_content(&self, text: &str) -> bool {
        text.chars()
            .filter(|&c| self.tables.is_target_char(c))
            .any(char::is_alphanumeric)
    }

    /// True if nothing but filler tokens and punctuation remains.
    fn is_only_fillers(&self, text: &str) -> bool {
        let norm = normalize(text);
        let words: Vec<&str> = norm
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return true;
        }

        // Match multi-word fillers greedily, longest first, then single
        // words (allowing stretched variants like "ummm").
        let mut phrases: Vec<Vec<&str>> = self
            .tables
            .fillers()
            .iter()
            .map(|p| p.split_whitespace().collect())
            .collect();
        phrases.sort_by_key(|p: &Vec<&str>| std::cmp::Reverse(p.len()));

        let mut i = 0;
        'outer: while i < words.len() {
            for phrase in &phrases {
                if phrase.len() > 1 && words[i..].starts_with(&phrase[..]) {
                    i += phrase.len();
                    continue 'outer;
                }
                if phrase.len() == 1 && collapse_repeats(words[i]) == collapse_repeats(phrase[0]) {
                    i += 1;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }
}

/// Drop a segment whose normalized text equals the previously *kept*
/// segment's, regardless of speaker: the model frequently repeats a
/// phrase across a false segment boundary.
fn drop_consecutive_duplicates(segments: Vec<SpeakerSegment>) -> Vec<SpeakerSegment> {
    let mut kept: Vec<SpeakerSegment> = Vec::with_capacity(segments.len());
    let mut last_norm: Option<String> = None;

    for segment in segments {
        let norm = normalize(&segment.text);
        if last_norm.as_deref() == Some(norm.as_str()) {
            continue;
        }
        last_norm = Some(norm);
        kept.push(segment);
    }
    kept
}

/// Collapse runs of the same character: "ummm" -> "um", "hmm" -> "hm".
fn collapse_repeats(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if prev != Some(c) {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
