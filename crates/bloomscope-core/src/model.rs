//! Core data model types for bloomscope.
//!
//! Everything here is built once per request and never patched in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::taxonomy::{all_levels, Level, LEVEL_COUNT};

/// Per-level scores for one question. Every level is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Level, u32>", from = "BTreeMap<Level, u32>")]
pub struct LevelScore {
    scores: [u32; LEVEL_COUNT],
}

impl LevelScore {
    pub fn get(&self, level: Level) -> u32 {
        self.scores[level.index()]
    }

    pub fn add(&mut self, level: Level, weight: u32) {
        self.scores[level.index()] += weight;
    }

    /// Highest score across all levels.
    pub fn max(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().sum()
    }

    /// `(level, score)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, u32)> + '_ {
        all_levels().iter().map(move |&level| (level, self.get(level)))
    }
}

impl From<LevelScore> for BTreeMap<Level, u32> {
    fn from(score: LevelScore) -> Self {
        score.iter().collect()
    }
}

impl From<BTreeMap<Level, u32>> for LevelScore {
    fn from(map: BTreeMap<Level, u32>) -> Self {
        let mut score = LevelScore::default();
        for (level, value) in map {
            score.add(level, value);
        }
        score
    }
}

/// A level together with the score that earned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMatch {
    pub level: Level,
    pub score: u32,
}

impl LevelMatch {
    pub fn new(level: Level, score: u32) -> Self {
        Self { level, score }
    }
}

/// Classification of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "levels", rename_all = "snake_case")]
pub enum Classification {
    /// One decisive level.
    Single(LevelMatch),
    /// Two or more levels scoring near the maximum, highest first.
    Multi(Vec<LevelMatch>),
}

impl Classification {
    /// The highest-scoring level.
    pub fn primary(&self) -> Level {
        match self {
            Classification::Single(m) => m.level,
            Classification::Multi(levels) => levels
                .first()
                .map(|m| m.level)
                .unwrap_or(Level::Remember),
        }
    }

    pub fn is_multi_level(&self) -> bool {
        matches!(self, Classification::Multi(_))
    }

    /// All matched levels, highest first.
    pub fn levels(&self) -> &[LevelMatch] {
        match self {
            Classification::Single(m) => std::slice::from_ref(m),
            Classification::Multi(levels) => levels,
        }
    }

    /// Short level names joined with " + ", e.g. "Understand + Analyze".
    pub fn display(&self) -> String {
        self.levels()
            .iter()
            .map(|m| m.level.name())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// A numbered per-question record in an [`AnalysisReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    /// 1-based position in the source document.
    pub question_number: usize,
    pub question: String,
    /// Primary level.
    pub level: Level,
    pub level_display: String,
    pub description: String,
    pub color: String,
    pub is_multi_level: bool,
    pub classification: Classification,
    pub scores: LevelScore,
}

impl QuestionResult {
    pub fn new(
        question_number: usize,
        question: String,
        classification: Classification,
        scores: LevelScore,
    ) -> Self {
        let level = classification.primary();
        Self {
            question_number,
            question,
            level,
            level_display: classification.display(),
            description: level.description().to_string(),
            color: level.color().to_string(),
            is_multi_level: classification.is_multi_level(),
            classification,
            scores,
        }
    }
}

/// A question that landed on more than one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLevelQuestion {
    pub question_number: usize,
    pub question: String,
    pub levels: Vec<LevelMatch>,
}

/// Count and share of questions whose primary level is a given level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelShare {
    pub count: usize,
    /// Percentage of all questions, rounded to one decimal.
    pub percentage: f64,
}

/// Aggregate classification of a question paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_questions: usize,
    pub level_counts: BTreeMap<Level, usize>,
    pub level_percentages: BTreeMap<Level, LevelShare>,
    pub questions: Vec<QuestionResult>,
    pub multi_level_questions: Vec<MultiLevelQuestion>,
    pub multi_level_count: usize,
}

impl AnalysisReport {
    pub fn count(&self, level: Level) -> usize {
        self.level_counts.get(&level).copied().unwrap_or(0)
    }

    pub fn percentage(&self, level: Level) -> f64 {
        self.level_percentages
            .get(&level)
            .map(|s| s.percentage)
            .unwrap_or(0.0)
    }

    /// Level with the most questions; ties go to the lower rank.
    pub fn dominant_level(&self) -> Option<Level> {
        if self.total_questions == 0 {
            return None;
        }
        let mut best: Option<(Level, usize)> = None;
        for &level in all_levels() {
            let count = self.count(level);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((level, count));
            }
        }
        best.map(|(level, _)| level)
    }
}
