//! CSV export of per-question classifications.

use anyhow::{Context, Result};
use std::path::Path;

use ::csv::{Terminator, WriterBuilder};

use bloomscope_core::model::AnalysisReport;

const HEADER: [&str; 5] = [
    "Question_Number",
    "Question",
    "Blooms_Level",
    "Level_Display",
    "Description",
];

/// Render one row per question, CRLF-terminated.
pub fn generate_csv(analysis: &AnalysisReport) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for q in &analysis.questions {
        writer.write_record([
            q.question_number.to_string().as_str(),
            q.question.as_str(),
            q.level.label(),
            q.level_display.as_str(),
            q.description.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Write a CSV report to a file.
pub fn write_csv_report(analysis: &AnalysisReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_csv(analysis)?)
        .with_context(|| format!("failed to write CSV report to {}", path.display()))
}
