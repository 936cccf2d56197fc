//! bloomscope-core: Bloom's Taxonomy question classification.
//!
//! This crate holds the keyword taxonomy, the question extractor, the level
//! scorer and resolver, per-document aggregation, and the batch engine that
//! the rest of bloomscope builds on.

pub mod engine;
pub mod error;
pub mod extractor;
pub mod model;
pub mod report;
pub mod resolver;
pub mod scorer;
pub mod statistics;
pub mod taxonomy;
pub mod traits;

pub use engine::{analyze_document, classify_single};
pub use error::ClassifyError;
pub use model::{AnalysisReport, Classification, LevelMatch, LevelScore};
pub use taxonomy::Level;
