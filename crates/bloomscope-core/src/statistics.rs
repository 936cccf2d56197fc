//! Per-document aggregation of question classifications.

use std::collections::BTreeMap;

use crate::model::{AnalysisReport, LevelShare, MultiLevelQuestion, QuestionResult};
use crate::resolver::{resolve, ResolveMode};
use crate::scorer::score_question;
use crate::taxonomy::{all_levels, Level};

/// Classify every question and summarise the level distribution.
///
/// Each question is resolved in multi-level mode; its primary level feeds
/// the per-level counts. An empty slice produces an all-zero report.
pub fn analyze_questions<S: AsRef<str>>(questions: &[S]) -> AnalysisReport {
    let total_questions = questions.len();
    let mut level_counts: BTreeMap<Level, usize> =
        all_levels().iter().map(|&level| (level, 0)).collect();
    let mut results = Vec::with_capacity(total_questions);
    let mut multi_level_questions = Vec::new();

    for (i, question) in questions.iter().enumerate() {
        let question = question.as_ref();
        let number = i + 1;
        let scores = score_question(question);
        let classification = resolve(question, &scores, ResolveMode::Multi);

        *level_counts.entry(classification.primary()).or_default() += 1;

        if classification.is_multi_level() {
            multi_level_questions.push(MultiLevelQuestion {
                question_number: number,
                question: question.to_string(),
                levels: classification.levels().to_vec(),
            });
        }

        results.push(QuestionResult::new(
            number,
            question.to_string(),
            classification,
            scores,
        ));
    }

    let level_percentages = level_counts
        .iter()
        .map(|(&level, &count)| {
            (
                level,
                LevelShare {
                    count,
                    percentage: percentage(count, total_questions),
                },
            )
        })
        .collect();

    let multi_level_count = multi_level_questions.len();

    AnalysisReport {
        total_questions,
        level_counts,
        level_percentages,
        questions: results,
        multi_level_questions,
        multi_level_count,
    }
}

/// `count / total * 100`, rounded to one decimal; zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_tenth(count as f64 / total as f64 * 100.0)
}

/// Round the exact binary value to one decimal, ties to even.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
