//! Plain-text decoder.

use bloomscope_core::error::ClassifyError;
use bloomscope_core::traits::{DecodedDocument, DocumentDecoder};

/// Decodes UTF-8 text files.
///
/// Strips a leading byte-order mark and normalises `\r\n` and lone `\r`
/// line endings to `\n`.
#[derive(Debug, Default)]
pub struct PlainTextDecoder;

impl PlainTextDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for PlainTextDecoder {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ClassifyError> {
        let text = decode_utf8(bytes, "txt")?;
        Ok(DecodedDocument::Text(normalize_newlines(text).trim().to_string()))
    }
}

/// Decode UTF-8, dropping a leading BOM.
pub(crate) fn decode_utf8<'a>(bytes: &'a [u8], format: &str) -> Result<&'a str, ClassifyError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| ClassifyError::unreadable(format, e.to_string()))
}

pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
