//! Mock decoder for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use bloomscope_core::error::ClassifyError;
use bloomscope_core::traits::{DecodedDocument, DocumentDecoder};

/// A decoder that ignores its input and returns a canned document, or fails.
///
/// Lets the batch engine be exercised without real files.
pub struct MockDecoder {
    response: Result<DecodedDocument, String>,
    call_count: AtomicU32,
    last_input: Mutex<Option<Vec<u8>>>,
}

impl MockDecoder {
    /// Always decode to `text`.
    pub fn with_text(text: &str) -> Self {
        Self::from_response(Ok(DecodedDocument::Text(text.to_string())))
    }

    /// Always decode to the given question list.
    pub fn with_questions(questions: &[&str]) -> Self {
        let list = questions.iter().map(|q| q.to_string()).collect();
        Self::from_response(Ok(DecodedDocument::Questions(list)))
    }

    /// Always fail with an unreadable-document error carrying `reason`.
    pub fn failing(reason: &str) -> Self {
        Self::from_response(Err(reason.to_string()))
    }

    fn from_response(response: Result<DecodedDocument, String>) -> Self {
        Self {
            response,
            call_count: AtomicU32::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Number of decode calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Bytes passed to the most recent decode call.
    pub fn last_input(&self) -> Option<Vec<u8>> {
        self.last_input.lock().unwrap().clone()
    }
}

impl DocumentDecoder for MockDecoder {
    fn name(&self) -> &str {
        "mock"
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ClassifyError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_input.lock().unwrap() = Some(bytes.to_vec());

        self.response
            .clone()
            .map_err(|reason| ClassifyError::unreadable("mock", reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_text() {
        let decoder = MockDecoder::with_text("What is a cell?");
        let doc = decoder.decode(b"ignored").unwrap();
        assert_eq!(doc, DecodedDocument::Text("What is a cell?".into()));
        assert_eq!(decoder.call_count(), 1);
        assert_eq!(decoder.last_input().as_deref(), Some(&b"ignored"[..]));
    }

    #[test]
    fn failing_decoder() {
        let decoder = MockDecoder::failing("corrupt xref table");
        let err = decoder.decode(b"%PDF").unwrap_err();
        assert!(err.to_string().contains("corrupt xref table"));
        assert_eq!(decoder.call_count(), 1);
    }
}
