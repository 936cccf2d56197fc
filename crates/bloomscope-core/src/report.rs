//! Document and batch report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AnalysisReport;
use crate::taxonomy::{all_levels, Level};
use crate::traits::DocumentFormat;

/// Analysis of one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the analysis finished.
    pub created_at: DateTime<Utc>,
    pub source: DocumentSummary,
    pub analysis: AnalysisReport,
    /// Decode + analysis time in milliseconds.
    pub duration_ms: u64,
}

/// Where a report came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub format: DocumentFormat,
    pub size_bytes: usize,
}

impl DocumentReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }

    /// Format the level distribution as markdown.
    pub fn to_markdown(&self) -> String {
        let a = &self.analysis;
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.source.name));
        md.push_str(&format!(
            "**Summary:** {} questions, {} multi-level\n\n",
            a.total_questions, a.multi_level_count
        ));

        md.push_str("| Level | Count | Share |\n");
        md.push_str("|-------|-------|-------|\n");
        for &level in all_levels() {
            md.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                level.label(),
                a.count(level),
                a.percentage(level)
            ));
        }

        if !a.multi_level_questions.is_empty() {
            md.push_str("\n### Multi-level questions\n\n");
            for q in &a.multi_level_questions {
                let levels = q
                    .levels
                    .iter()
                    .map(|m| format!("{} {}", m.level.name(), m.score))
                    .collect::<Vec<_>>()
                    .join(", ");
                md.push_str(&format!("- Q{}: {} ({})\n", q.question_number, q.question, levels));
            }
        }

        md
    }
}

/// A document that could not be analysed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub name: String,
    pub error: String,
}

/// Result of analysing a batch of documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Successful analyses, in submission order.
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<DocumentFailure>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Question counts per level summed over all documents.
    pub fn level_totals(&self) -> BTreeMap<Level, usize> {
        let mut totals: BTreeMap<Level, usize> =
            all_levels().iter().map(|&level| (level, 0)).collect();
        for doc in &self.documents {
            for (&level, &count) in &doc.analysis.level_counts {
                *totals.entry(level).or_default() += count;
            }
        }
        totals
    }

    pub fn total_questions(&self) -> usize {
        self.documents
            .iter()
            .map(|d| d.analysis.total_questions)
            .sum()
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::analyze_questions;

    fn make_report(name: &str, questions: &[&str]) -> DocumentReport {
        DocumentReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            source: DocumentSummary {
                name: name.into(),
                format: DocumentFormat::Text,
                size_bytes: 0,
            },
            analysis: analyze_questions(questions),
            duration_ms: 0,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report("midterm.txt", &["Define osmosis.", "Explain and analyze the poem."]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = DocumentReport::load_json(&path).unwrap();

        assert_eq!(loaded.source.name, "midterm.txt");
        assert_eq!(loaded.analysis.total_questions, 2);
        assert_eq!(loaded.analysis.count(Level::Remember), 1);
        assert!(loaded.analysis.questions[1].classification.is_multi_level());
    }

    #[test]
    fn load_missing_file_fails() {
        let result = DocumentReport::load_json(Path::new("no_such_report.json"));
        assert!(result.is_err());
    }

    #[test]
    fn markdown_output() {
        let report = make_report("quiz.txt", &["Explain and analyze the poem.", "Define osmosis."]);
        let md = report.to_markdown();
        assert!(md.contains("## quiz.txt"));
        assert!(md.contains("| L1-Remember | 1 | 50.0% |"));
        assert!(md.contains("Multi-level questions"));
        assert!(md.contains("(Understand 5, Analyze 5)"));
    }

    #[test]
    fn batch_totals() {
        let batch = BatchReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            documents: vec![
                make_report("a.txt", &["Define osmosis."]),
                make_report("b.txt", &["List three primary colors.", "Solve for x in 2x + 4 = 10."]),
            ],
            failures: vec![],
            duration_ms: 0,
        };
        let totals = batch.level_totals();
        assert_eq!(totals[&Level::Remember], 2);
        assert_eq!(totals[&Level::Apply], 1);
        assert_eq!(batch.total_questions(), 3);
    }
}
