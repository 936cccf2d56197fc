//! Classification error types.
//!
//! All three variants are terminal for the call that raised them. The engine
//! is deterministic, so retrying with the same input cannot help.

use thiserror::Error;

/// Errors surfaced by the classification engine and its decoders.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The question was empty or whitespace-only.
    #[error("question is empty")]
    EmptyInput,

    /// The extractor found no questions in the document.
    #[error("no questions found in document")]
    NoQuestionsFound,

    /// The document could not be decoded to plain text.
    #[error("unreadable {format} document: {reason}")]
    UnreadableDocument { format: String, reason: String },
}

impl ClassifyError {
    pub fn unreadable(format: impl Into<String>, reason: impl Into<String>) -> Self {
        ClassifyError::UnreadableDocument {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error stems from the content the caller supplied
    /// rather than from decoding it.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ClassifyError::EmptyInput | ClassifyError::NoQuestionsFound
        )
    }
}
