//! The `bloomscope analyze` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use bloomscope_core::engine::{AnalysisEngine, ProgressReporter, SourceDocument};
use bloomscope_core::report::DocumentReport;
use bloomscope_core::taxonomy::all_levels;
use bloomscope_core::traits::DocumentFormat;
use bloomscope_decoders::config::{load_config_from, BloomscopeConfig};
use bloomscope_decoders::decoder_registry;
use bloomscope_report::csv::write_csv_report;
use bloomscope_report::html::write_html_report;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_document_start(&self, name: &str) {
        eprintln!("  Starting: {name}");
    }

    fn on_document_complete(&self, report: &DocumentReport) {
        eprintln!(
            "  Done: {} ({} questions, {} multi-level, {}ms)",
            report.source.name,
            report.analysis.total_questions,
            report.analysis.multi_level_count,
            report.duration_ms,
        );
    }

    fn on_document_error(&self, name: &str, error: &str) {
        eprintln!("  ERROR: {name}: {error}");
    }

    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} analysed, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    input: PathBuf,
    format: Option<String>,
    output: Option<PathBuf>,
    parallelism: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(p) = parallelism {
        anyhow::ensure!(p >= 1, "parallelism must be at least 1");
        config.parallelism = p;
    }
    if let Some(dir) = output {
        config.output_dir = dir;
    }
    let formats = parse_formats(format.as_deref(), &config.formats)?;

    let documents = collect_documents(&input, &config)?;
    anyhow::ensure!(
        !documents.is_empty(),
        "no supported documents found in {}",
        input.display()
    );

    eprintln!(
        "bloomscope v{} - analysing {} document(s)",
        env!("CARGO_PKG_VERSION"),
        documents.len()
    );
    eprintln!();

    let engine = AnalysisEngine::new(decoder_registry(&config), config.engine_config());
    let batch = engine.run(documents, &ConsoleReporter).await?;

    if batch.documents.is_empty() {
        let reasons = batch
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.name, f.error))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("no document could be analysed ({reasons})");
    }

    for report in &batch.documents {
        print_summary(report);
    }

    let output = &config.output_dir;
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output dir {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for report in &batch.documents {
        let stem = file_stem(&report.source.name);
        for fmt in &formats {
            match fmt.as_str() {
                "json" => {
                    let path = output.join(format!("{stem}-{timestamp}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("{stem}-{timestamp}.html"));
                    write_html_report(report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                "csv" => {
                    let path = output.join(format!("{stem}-{timestamp}.csv"));
                    write_csv_report(&report.analysis, &path)?;
                    eprintln!("CSV report: {}", path.display());
                }
                other => eprintln!("Unknown format: {other}"),
            }
        }
    }

    if batch.documents.len() > 1 {
        let path = output.join(format!("batch-{timestamp}.json"));
        batch.save_json(&path)?;
        eprintln!("Batch summary: {}", path.display());
    }

    Ok(())
}

const KNOWN_FORMATS: [&str; 3] = ["json", "html", "csv"];

fn parse_formats(flag: Option<&str>, configured: &[String]) -> Result<Vec<String>> {
    let requested: Vec<String> = match flag {
        Some(f) => f.split(',').map(|s| s.trim().to_lowercase()).collect(),
        None => configured.to_vec(),
    };

    if requested.iter().any(|f| f == "all") {
        return Ok(KNOWN_FORMATS.iter().map(|f| f.to_string()).collect());
    }

    let mut formats = Vec::new();
    for f in requested.into_iter().filter(|f| !f.is_empty()) {
        anyhow::ensure!(
            KNOWN_FORMATS.contains(&f.as_str()),
            "unknown output format '{f}' (expected json, html, csv or all)"
        );
        if !formats.contains(&f) {
            formats.push(f);
        }
    }
    anyhow::ensure!(!formats.is_empty(), "at least one output format is required");
    Ok(formats)
}

/// Read `input` (a file, or every supported file directly inside a directory).
fn collect_documents(input: &Path, config: &BloomscopeConfig) -> Result<Vec<SourceDocument>> {
    if input.is_dir() {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(input)
            .with_context(|| format!("failed to read directory {}", input.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            match DocumentFormat::from_path(&path) {
                Some(format) if config.is_allowed(format) => {
                    documents.push(read_document(&path, format)?);
                }
                _ => tracing::warn!("skipping unsupported file {}", path.display()),
            }
        }
        Ok(documents)
    } else {
        let format = DocumentFormat::from_path(input)
            .with_context(|| format!("cannot tell the format of {}", input.display()))?;
        anyhow::ensure!(
            config.is_allowed(format),
            "{format} documents are not allowed by the configuration"
        );
        Ok(vec![read_document(input, format)?])
    }
}

fn read_document(path: &Path, format: DocumentFormat) -> Result<SourceDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceDocument {
        name,
        format,
        bytes,
    })
}

/// Report file prefix for a document name: "midterm.txt" -> "midterm_txt".
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

fn print_summary(report: &DocumentReport) {
    use comfy_table::{Cell, Table};

    let analysis = &report.analysis;
    let mut table = Table::new();
    table.set_header(vec!["Level", "Description", "Count", "Share"]);

    for &level in all_levels() {
        table.add_row(vec![
            Cell::new(level.label()),
            Cell::new(level.description()),
            Cell::new(analysis.count(level)),
            Cell::new(format!("{:.1}%", analysis.percentage(level))),
        ]);
    }

    eprintln!(
        "\n{}: {} questions, {} multi-level",
        report.source.name, analysis.total_questions, analysis.multi_level_count
    );
    eprintln!("{table}");
    if let Some(level) = analysis.dominant_level() {
        eprintln!("Dominant level: {}", level.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_flag_and_config() {
        let configured = vec!["json".to_string()];
        assert_eq!(parse_formats(None, &configured).unwrap(), vec!["json"]);
        assert_eq!(
            parse_formats(Some("HTML, csv,html"), &configured).unwrap(),
            vec!["html", "csv"]
        );
        assert_eq!(
            parse_formats(Some("all"), &configured).unwrap(),
            vec!["json", "html", "csv"]
        );
        assert!(parse_formats(Some("sarif"), &configured).is_err());
        assert!(parse_formats(Some(""), &configured).is_err());
    }

    #[test]
    fn stems_are_filesystem_safe() {
        assert_eq!(file_stem("midterm.txt"), "midterm_txt");
        assert_eq!(file_stem("unit 3/quiz-a.csv"), "unit_3_quiz-a_csv");
    }
}
