//! CSV question-list decoder.
//!
//! Spreadsheet exports carry one question per row. The first row is a
//! header; the question column is the first header named like
//! [`QUESTION_COLUMNS`], or column 0 when none is.

use ::csv::{ReaderBuilder, StringRecord};

use bloomscope_core::error::ClassifyError;
use bloomscope_core::extractor::MIN_QUESTION_CHARS;
use bloomscope_core::traits::{DecodedDocument, DocumentDecoder};

use crate::text::decode_utf8;

/// Header names recognised as the question column (case-insensitive).
pub const QUESTION_COLUMNS: &[&str] = &["question", "questions", "q", "query"];

/// Reads questions from a CSV export.
#[derive(Debug, Default)]
pub struct CsvQuestionDecoder;

impl CsvQuestionDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for CsvQuestionDecoder {
    fn name(&self) -> &str {
        "csv"
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ClassifyError> {
        let text = decode_utf8(bytes, "csv")?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header = reader.headers().map_err(unreadable)?.clone();
        if header.is_empty() {
            return Ok(DecodedDocument::Questions(Vec::new()));
        }
        let column = question_column(&header);
        tracing::debug!(column, header = ?header, "using question column");

        let mut questions = Vec::new();
        for record in reader.records() {
            let record = record.map_err(unreadable)?;
            let Some(cell) = record.get(column).map(str::trim) else {
                continue;
            };
            if !cell.eq_ignore_ascii_case("nan") && cell.chars().count() > MIN_QUESTION_CHARS {
                questions.push(cell.to_string());
            }
        }

        Ok(DecodedDocument::Questions(questions))
    }
}

fn unreadable(e: ::csv::Error) -> ClassifyError {
    ClassifyError::unreadable("csv", e.to_string())
}

fn question_column(header: &StringRecord) -> usize {
    header
        .iter()
        .position(|name| {
            let name = name.trim().to_lowercase();
            QUESTION_COLUMNS.contains(&name.as_str())
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(doc: DecodedDocument) -> Vec<String> {
        match doc {
            DecodedDocument::Questions(q) => q,
            DecodedDocument::Text(_) => panic!("expected a question list"),
        }
    }

    #[test]
    fn quoted_cells_keep_commas_quotes_and_newlines() {
        let csv = "question\n\"Explain, briefly, \"\"osmosis\"\".\"\n\n\"Describe\nthe cell.\"\n";
        let q = questions(CsvQuestionDecoder.decode(csv.as_bytes()).unwrap());
        assert_eq!(
            q,
            vec!["Explain, briefly, \"osmosis\".", "Describe\nthe cell."]
        );
    }

    #[test]
    fn finds_named_question_column() {
        let csv = "id,Question,marks\n1,Define osmosis.,2\n2,\"Explain, briefly, diffusion.\",3\n";
        let q = questions(CsvQuestionDecoder.decode(csv.as_bytes()).unwrap());
        assert_eq!(q, vec!["Define osmosis.", "Explain, briefly, diffusion."]);
    }

    #[test]
    fn falls_back_to_first_column() {
        let csv = "Prompt,Marks\nList three primary colors.,1\r\nDesign a bridge.,5\r\n";
        let q = questions(CsvQuestionDecoder.decode(csv.as_bytes()).unwrap());
        assert_eq!(q, vec!["List three primary colors.", "Design a bridge."]);
    }

    #[test]
    fn drops_nan_short_and_missing_cells() {
        let csv = "marks,query\n1,nan\n2,Why?\n3\n4,  Evaluate the essay.  \n";
        let q = questions(CsvQuestionDecoder.decode(csv.as_bytes()).unwrap());
        assert_eq!(q, vec!["Evaluate the essay."]);
    }

    #[test]
    fn empty_file_has_no_questions() {
        let q = questions(CsvQuestionDecoder.decode(b"").unwrap());
        assert!(q.is_empty());
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let err = CsvQuestionDecoder.decode(&[0xc3, 0x28]).unwrap_err();
        assert!(err.to_string().contains("csv"));
    }
}
