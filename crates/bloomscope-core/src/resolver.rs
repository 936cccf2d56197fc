//! Turning per-level scores into a classification.

use crate::model::{Classification, LevelMatch, LevelScore};
use crate::taxonomy::Level;

/// Fraction of the top score a level needs to join a multi-level result.
pub const MULTI_LEVEL_THRESHOLD: f64 = 0.6;

const REMEMBER_CUES: &[&str] = &["what", "who", "when", "where", "which"];
const UNDERSTAND_CUES: &[&str] = &["how", "why", "explain"];

/// Whether to allow several near-equal levels in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    Single,
    #[default]
    Multi,
}

/// Pick the single best level.
///
/// With all scores at zero, falls back on the question's interrogative
/// words. Otherwise the first level in declaration order holding the
/// maximum wins.
pub fn resolve_single(question: &str, scores: &LevelScore) -> LevelMatch {
    let max = scores.max();
    if max == 0 {
        return LevelMatch::new(structural_fallback(question), 0);
    }

    let mut best = LevelMatch::new(Level::Remember, 0);
    for (level, score) in scores.iter() {
        if score > best.score {
            best = LevelMatch::new(level, score);
        }
    }
    best
}

/// Resolve `scores` for `question` in the requested mode.
pub fn resolve(question: &str, scores: &LevelScore, mode: ResolveMode) -> Classification {
    if mode == ResolveMode::Multi {
        let max = scores.max();
        if max > 0 {
            let threshold = f64::from(max) * MULTI_LEVEL_THRESHOLD;
            let mut near_max: Vec<LevelMatch> = scores
                .iter()
                .filter(|&(_, score)| score > 0 && f64::from(score) >= threshold)
                .map(|(level, score)| LevelMatch::new(level, score))
                .collect();
            // stable: equal scores keep declaration order
            near_max.sort_by(|a, b| b.score.cmp(&a.score));

            if near_max.len() > 1 {
                tracing::debug!(
                    levels = near_max.len(),
                    max,
                    "question resolved to multiple levels"
                );
                return Classification::Multi(near_max);
            }
        }
    }

    Classification::Single(resolve_single(question, scores))
}

fn structural_fallback(question: &str) -> Level {
    let lower = question.to_lowercase();
    if REMEMBER_CUES.iter().any(|w| lower.contains(w)) {
        Level::Remember
    } else if UNDERSTAND_CUES.iter().any(|w| lower.contains(w)) {
        Level::Understand
    } else {
        Level::Remember
    }
}
