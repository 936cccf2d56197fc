//! Document decoding boundary.
//!
//! Turning uploaded bytes into text is the job of an external collaborator.
//! The engine only sees it through [`DocumentDecoder`], implemented by the
//! `bloomscope-decoders` crate.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Source document formats the engine knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[serde(rename = "txt", alias = "text")]
    Text,
    Csv,
    Pdf,
    Docx,
    Doc,
    Xlsx,
    Xls,
}

impl DocumentFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Spreadsheet formats carry one question per row.
    pub fn is_tabular(self) -> bool {
        matches!(
            self,
            DocumentFormat::Csv | DocumentFormat::Xlsx | DocumentFormat::Xls
        )
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Text => write!(f, "txt"),
            DocumentFormat::Csv => write!(f, "csv"),
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Doc => write!(f, "doc"),
            DocumentFormat::Xlsx => write!(f, "xlsx"),
            DocumentFormat::Xls => write!(f, "xls"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "txt" | "text" | "md" => Ok(DocumentFormat::Text),
            "csv" => Ok(DocumentFormat::Csv),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "doc" => Ok(DocumentFormat::Doc),
            "xlsx" => Ok(DocumentFormat::Xlsx),
            "xls" => Ok(DocumentFormat::Xls),
            other => Err(format!("unknown document format: {other}")),
        }
    }
}

/// Output of a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedDocument {
    /// Free text; questions still have to be extracted.
    Text(String),
    /// One question per entry, already split (e.g. spreadsheet rows).
    Questions(Vec<String>),
}

/// Converts raw document bytes into something the engine can analyse.
pub trait DocumentDecoder: Send + Sync {
    /// Human-readable decoder name (e.g. "plain-text").
    fn name(&self) -> &str;

    /// Decode `bytes`. Failures must be [`ClassifyError::UnreadableDocument`].
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ClassifyError>;
}
