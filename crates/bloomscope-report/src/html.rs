//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use bloomscope_core::model::AnalysisReport;
use bloomscope_core::report::DocumentReport;
use bloomscope_core::taxonomy::all_levels;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report for one analysed document.
pub fn generate_html(report: &DocumentReport) -> String {
    let analysis = &report.analysis;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>bloomscope report: {}</title>\n",
        html_escape(&report.source.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Bloom's Taxonomy analysis</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Document: <strong>{}</strong> | {} questions | {} multi-level | {}</p>\n",
        html_escape(&report.source.name),
        analysis.total_questions,
        analysis.multi_level_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Level distribution
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Level distribution</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Level</th><th>Description</th><th>Count</th><th>Share</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for &level in all_levels() {
        html.push_str(&format!(
            "<tr><td><span class=\"swatch\" style=\"background:{}\"></span>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            level.color(),
            level.label(),
            level.description(),
            analysis.count(level),
            analysis.percentage(level),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str(&generate_bar_chart(analysis));
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Level</th><th onclick=\"sortTable(3)\">Description</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for q in &analysis.questions {
        let row_class = if q.is_multi_level { "multi" } else { "single" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td style=\"border-left: 6px solid {}\">{}</td><td>{}</td></tr>\n",
            row_class,
            q.question_number,
            html_escape(&q.question),
            q.color,
            html_escape(&q.level_display),
            html_escape(&q.description),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &DocumentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(analysis: &AnalysisReport) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;

    let levels = all_levels();
    let total_height = levels.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, &level) in levels.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let share = analysis.percentage(level);
        let width = (share / 100.0 * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            level.name()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            level.color()
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{} ({:.1}%)</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            analysis.count(level),
            share
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --multi: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --multi: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.swatch { display: inline-block; width: 0.8rem; height: 0.8rem; margin-right: 0.5rem; border-radius: 2px; }
.multi { background: var(--multi); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use bloomscope_core::report::DocumentSummary;
    use bloomscope_core::statistics::analyze_questions;
    use bloomscope_core::traits::DocumentFormat;

    fn make_test_report() -> DocumentReport {
        DocumentReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            source: DocumentSummary {
                name: "midterm <draft>.txt".into(),
                format: DocumentFormat::Text,
                size_bytes: 64,
            },
            analysis: analyze_questions(&[
                "Define osmosis.",
                "Explain and analyze the poem.",
                "Design a new product for sustainable living.",
            ]),
            duration_ms: 3,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("midterm &lt;draft&gt;.txt"));
        assert!(html.contains("L6-Create"));
        assert!(html.contains("Define osmosis."));
        assert!(html.contains("Understand + Analyze"));
        assert!(html.contains("<tr class=\"multi\">"));
    }

    #[test]
    fn bar_chart_uses_level_colors() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("<svg"));
        for &level in all_levels() {
            assert!(html.contains(&format!("fill=\"{}\"", level.color())));
        }
        assert!(html.contains("1 (33.3%)"));
    }

    #[test]
    fn raw_json_escapes_entities() {
        let mut report = make_test_report();
        report.analysis = analyze_questions(&["Explain why a &lt; b holds."]);
        let html = generate_html(&report);
        assert!(html.contains("Explain why a &amp;lt; b holds."));
        assert!(!html.contains("a &lt; b"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
