//! bloomscope-decoders: turning uploaded documents into analysable text.
//!
//! Implements the `DocumentDecoder` trait for plain text and CSV question
//! lists, and loads the bloomscope configuration file.

pub mod config;
pub mod csv;
pub mod mock;
pub mod text;

pub use config::{create_decoder, decoder_registry, load_config, BloomscopeConfig};
pub use self::csv::CsvQuestionDecoder;
pub use text::PlainTextDecoder;
