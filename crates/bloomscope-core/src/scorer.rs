//! Keyword scoring of a single question.
//!
//! Bag-of-substrings: each strong indicator contained in the lowercased
//! question adds 4 to its level, each ordinary keyword adds 1, and the two
//! passes accumulate. Scores are not normalised by question length.

use crate::model::LevelScore;
use crate::taxonomy::{all_levels, level_keywords};

/// Weight of a strong-indicator match.
pub const STRONG_INDICATOR_WEIGHT: u32 = 4;

/// Weight of an ordinary keyword match.
pub const KEYWORD_WEIGHT: u32 = 1;

/// Score `question` against every level.
pub fn score_question(question: &str) -> LevelScore {
    let lower = question.trim().to_lowercase();
    let mut scores = LevelScore::default();

    for &level in all_levels() {
        let hits = count_hits(&lower, level_keywords(level).strong_indicators);
        scores.add(level, hits * STRONG_INDICATOR_WEIGHT);
    }

    for &level in all_levels() {
        let hits = count_hits(&lower, level_keywords(level).keywords);
        scores.add(level, hits * KEYWORD_WEIGHT);
    }

    scores
}

fn count_hits(haystack: &str, terms: &[&str]) -> u32 {
    terms.iter().filter(|term| haystack.contains(*term)).count() as u32
}
