//! Question extraction from decoded document text.
//!
//! Structural patterns run first and every match from every pattern is kept,
//! so a numbered question ending in `?` appears twice (once with its number,
//! once without). When no pattern matches at all, the text is split into
//! sentences and only sentences carrying an interrogative or instructional
//! cue word survive.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum trimmed length (exclusive) for an extracted question.
pub const MIN_QUESTION_CHARS: usize = 5;

/// Minimum trimmed length (exclusive) for a fallback sentence.
const MIN_SENTENCE_CHARS: usize = 10;

/// Words that mark a plain sentence as a question in fallback mode.
pub const CUE_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "explain", "describe", "analyze",
    "evaluate", "compare", "contrast",
];

/// Structural question patterns, applied in this order.
const QUESTION_PATTERNS: &[&str] = &[
    // Numbered items
    r"\d+\.\s*[A-Z][^.!?]*[.!?]",
    // Sentences ending with ?
    r"[A-Z][^.!?]*\?",
    // Q1. Q2. ...
    r"Q\d+\.\s*[A-Z][^.!?]*[.!?]",
    // Question 1. ...
    r"Question\s*\d+\.\s*[A-Z][^.!?]*[.!?]",
    // Sentences with a parenthesised option list
    r"[A-Z][^.!?]*\s*\([^)]*\)[^.!?]*[.!?]",
];

/// Splits raw text into candidate question strings.
pub struct QuestionExtractor {
    patterns: Vec<Regex>,
    sentence_break: Regex,
}

impl QuestionExtractor {
    pub fn new() -> Self {
        let patterns = QUESTION_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?im){p}")).expect("question pattern is valid"))
            .collect();
        Self {
            patterns,
            sentence_break: Regex::new(r"[.!?]+").expect("sentence pattern is valid"),
        }
    }

    /// Extract questions from `text`, in pattern order then match order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut candidates: Vec<&str> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.as_str()))
            .collect();

        if candidates.is_empty() {
            tracing::debug!("no structured questions found, falling back to sentence split");
            candidates = self
                .sentence_break
                .split(text)
                .map(str::trim)
                .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS && has_cue_word(s))
                .collect();
        }

        candidates
            .into_iter()
            .map(str::trim)
            .filter(|q| q.chars().count() > MIN_QUESTION_CHARS)
            .map(str::to_string)
            .collect()
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn has_cue_word(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    CUE_WORDS.iter().any(|cue| lower.contains(cue))
}

/// Extract questions with the shared process-wide extractor.
pub fn extract_questions(text: &str) -> Vec<String> {
    static EXTRACTOR: OnceLock<QuestionExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(QuestionExtractor::new).extract(text)
}
