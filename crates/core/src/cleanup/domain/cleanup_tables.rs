/// Known Whisper hallucination phrases: boilerplate the model emits with
/// no corresponding speech, typically at silence or end of recording.
const DEFAULT_HALLUCINATIONS: &[&str] = &[
    "thanks for watching",
    "thank you for watching",
    "please subscribe to the channel",
    "don't forget to subscribe",
    "please like and comment",
    "see you in the next video",
    "see you in the next one",
    "[music]",
    "[applause]",
    "[laughter]",
    "(music)",
    "(applause)",
];

/// Words that carry no content on their own. A segment consisting only
/// of these (plus punctuation) is dropped by the filler filter.
const DEFAULT_FILLERS: &[&str] = &[
    "uh", "um", "hmm", "huh", "mhm", "ah", "yeah", "yep", "yes", "okay", "ok", "right", "sure",
    "you know", "i mean",
];

/// Data tables driving the text filters.
///
/// The exact phrase lists are product content rather than algorithm, so
/// they are injectable; the defaults cover the artifacts Whisper is known
/// to produce on English meeting audio. Entries are normalized (lowercase,
/// collapsed whitespace) at construction so the filters can compare
/// directly against normalized segment text.
#[derive(Clone, Debug)]
pub struct CleanupTables {
    hallucinations: Vec<String>,
    fillers: Vec<String>,
    is_target_char: fn(char) -> bool,
}

impl CleanupTables {
    pub fn new(
        hallucinations: Vec<String>,
        fillers: Vec<String>,
        is_target_char: fn(char) -> bool,
    ) -> Self {
        Self {
            hallucinations: hallucinations.iter().map(|p| normalize(p)).collect(),
            fillers: fillers.iter().map(|p| normalize(p)).collect(),
            is_target_char,
        }
    }

    pub fn hallucinations(&self) -> &[String] {
        &self.hallucinations
    }

    pub fn fillers(&self) -> &[String] {
        &self.fillers
    }

    pub fn is_target_char(&self, c: char) -> bool {
        (self.is_target_char)(c)
    }
}

impl Default for CleanupTables {
    fn default() -> Self {
        Self::new(
            DEFAULT_HALLUCINATIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_FILLERS.iter().map(|s| s.to_string()).collect(),
            |c| c.is_ascii(),
        )
    }
}

/// Case-fold and collapse runs of whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_folds_and_collapses_whitespace() {
        assert_eq!(normalize("  Hello   WORLD \t again "), "hello world again");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_default_tables_are_normalized() {
        let tables = CleanupTables::default();
        for phrase in tables.hallucinations() {
            assert_eq!(phrase, &normalize(phrase));
        }
        for filler in tables.fillers() {
            assert_eq!(filler, &normalize(filler));
        }
    }

    #[test]
    fn test_custom_entries_normalized_at_construction() {
        let tables = CleanupTables::new(
            vec!["Thanks  For   Watching".to_string()],
            vec!["UM".to_string()],
            |c| c.is_ascii(),
        );
        assert_eq!(tables.hallucinations()[0], "thanks for watching");
        assert_eq!(tables.fillers()[0], "um");
    }

    #[test]
    fn test_default_target_charset_is_ascii() {
        let tables = CleanupTables::default();
        assert!(tables.is_target_char('a'));
        assert!(tables.is_target_char('!'));
        assert!(!tables.is_target_char('你'));
        assert!(!tables.is_target_char('こ'));
    }
}
