//! Classification entry points and the batch analysis engine.
//!
//! [`classify_single`] and [`analyze_document`] are the synchronous core
//! contract. [`AnalysisEngine`] decodes and analyses many documents at once
//! on a bounded pool of blocking workers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::ClassifyError;
use crate::extractor::{extract_questions, MIN_QUESTION_CHARS};
use crate::model::{AnalysisReport, Classification};
use crate::report::{BatchReport, DocumentFailure, DocumentReport, DocumentSummary};
use crate::resolver::{resolve, ResolveMode};
use crate::scorer::score_question;
use crate::statistics::analyze_questions;
use crate::traits::{DecodedDocument, DocumentDecoder, DocumentFormat};

/// Classify one question, allowing multi-level results.
pub fn classify_single(question: &str) -> Result<Classification, ClassifyError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ClassifyError::EmptyInput);
    }
    let scores = score_question(question);
    Ok(resolve(question, &scores, ResolveMode::Multi))
}

/// Extract and classify every question in `raw_text`.
pub fn analyze_document(raw_text: &str) -> Result<AnalysisReport, ClassifyError> {
    let questions = extract_questions(raw_text);
    if questions.is_empty() {
        return Err(ClassifyError::NoQuestionsFound);
    }
    tracing::debug!(count = questions.len(), "extracted questions");
    Ok(analyze_questions(&questions))
}

/// Analyse the output of a decoder.
///
/// Pre-split question lists skip extraction but still drop blank and
/// too-short entries.
pub fn analyze_decoded(document: &DecodedDocument) -> Result<AnalysisReport, ClassifyError> {
    match document {
        DecodedDocument::Text(text) => analyze_document(text),
        DecodedDocument::Questions(list) => {
            let questions: Vec<&str> = list
                .iter()
                .map(|q| q.trim())
                .filter(|q| q.chars().count() > MIN_QUESTION_CHARS)
                .collect();
            if questions.is_empty() {
                return Err(ClassifyError::NoQuestionsFound);
            }
            Ok(analyze_questions(&questions))
        }
    }
}

/// Configuration for the batch engine.
#[derive(Debug, Clone)]
pub struct AnalysisEngineConfig {
    /// Maximum documents analysed concurrently.
    pub parallelism: usize,
    /// Documents larger than this are rejected unread.
    pub max_document_bytes: usize,
}

impl Default for AnalysisEngineConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_document_bytes: 16 * 1024 * 1024,
        }
    }
}

/// A raw document submitted for analysis.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Display name, usually the file name.
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_document_start(&self, name: &str);
    fn on_document_complete(&self, report: &DocumentReport);
    fn on_document_error(&self, name: &str, error: &str);
    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_document_start(&self, _: &str) {}
    fn on_document_complete(&self, _: &DocumentReport) {}
    fn on_document_error(&self, _: &str, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Decodes and analyses batches of documents.
pub struct AnalysisEngine {
    decoders: HashMap<DocumentFormat, Arc<dyn DocumentDecoder>>,
    config: AnalysisEngineConfig,
}

impl AnalysisEngine {
    pub fn new(
        decoders: HashMap<DocumentFormat, Arc<dyn DocumentDecoder>>,
        config: AnalysisEngineConfig,
    ) -> Self {
        Self { decoders, config }
    }

    /// Analyse a single document on the current thread.
    pub fn analyze_source(&self, document: &SourceDocument) -> Result<DocumentReport, ClassifyError> {
        let decoder = self.decoders.get(&document.format).cloned();
        analyze_source_with(decoder, document, self.config.max_document_bytes)
    }

    /// Analyse every document; individual failures are recorded, not raised.
    pub async fn run(
        &self,
        documents: Vec<SourceDocument>,
        progress: &dyn ProgressReporter,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let max_bytes = self.config.max_document_bytes;

        let mut futures = FuturesUnordered::new();

        for (index, document) in documents.into_iter().enumerate() {
            let decoder = self.decoders.get(&document.format).cloned();
            let semaphore = Arc::clone(&semaphore);

            futures.push(async move {
                let name = document.name.clone();
                let inner = async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
                    progress.on_document_start(&document.name);

                    let report = tokio::task::spawn_blocking(move || {
                        analyze_source_with(decoder, &document, max_bytes)
                    })
                    .await??;
                    Ok::<_, anyhow::Error>(report)
                };
                (index, name, inner.await)
            });
        }

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        let total = futures.len();

        while let Some((index, name, result)) = futures.next().await {
            match result {
                Ok(report) => {
                    progress.on_document_complete(&report);
                    reports.push((index, report));
                }
                Err(e) => {
                    tracing::error!("analysis failed for {name}: {e:#}");
                    progress.on_document_error(&name, &e.to_string());
                    failures.push((
                        index,
                        DocumentFailure {
                            name,
                            error: e.to_string(),
                        },
                    ));
                }
            }
        }

        reports.sort_by_key(|(index, _)| *index);
        failures.sort_by_key(|(index, _)| *index);

        let elapsed = start.elapsed();
        progress.on_batch_complete(total, reports.len(), failures.len(), elapsed);

        Ok(BatchReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            documents: reports.into_iter().map(|(_, r)| r).collect(),
            failures: failures.into_iter().map(|(_, f)| f).collect(),
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}

fn analyze_source_with(
    decoder: Option<Arc<dyn DocumentDecoder>>,
    document: &SourceDocument,
    max_bytes: usize,
) -> Result<DocumentReport, ClassifyError> {
    let start = Instant::now();
    let format = document.format.to_string();

    if document.bytes.len() > max_bytes {
        return Err(ClassifyError::unreadable(
            format,
            format!(
                "{} is {} bytes, limit is {max_bytes}",
                document.name,
                document.bytes.len()
            ),
        ));
    }

    let decoder = decoder
        .ok_or_else(|| ClassifyError::unreadable(&format, "no decoder registered for format"))?;
    let decoded = decoder.decode(&document.bytes)?;
    let analysis = analyze_decoded(&decoded)?;

    tracing::info!(
        document = %document.name,
        decoder = decoder.name(),
        questions = analysis.total_questions,
        multi_level = analysis.multi_level_count,
        "document analysed"
    );

    Ok(DocumentReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        source: DocumentSummary {
            name: document.name.clone(),
            format: document.format,
            size_bytes: document.bytes.len(),
        },
        analysis,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Level;

    const TEN_QUESTIONS: &str = "1. Define osmosis.
2. Explain the water cycle.
3. Solve for x in 2x + 4 = 10.
4. Compare and contrast mitosis and meiosis.
5. Evaluate the argument for renewable energy.
6. Design a new product for sustainable living.
7. List three primary colors.
8. Volcanoes erupt.
9. Glaciers move slowly.
10. Bees pollinate flowers.";

    struct Utf8Decoder;

    impl DocumentDecoder for Utf8Decoder {
        fn name(&self) -> &str {
            "utf8"
        }

        fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ClassifyError> {
            String::from_utf8(bytes.to_vec())
                .map(DecodedDocument::Text)
                .map_err(|e| ClassifyError::unreadable("txt", e.to_string()))
        }
    }

    fn engine(parallelism: usize) -> AnalysisEngine {
        let mut decoders: HashMap<DocumentFormat, Arc<dyn DocumentDecoder>> = HashMap::new();
        decoders.insert(DocumentFormat::Text, Arc::new(Utf8Decoder));
        AnalysisEngine::new(
            decoders,
            AnalysisEngineConfig {
                parallelism,
                max_document_bytes: 1024,
            },
        )
    }

    fn text_doc(name: &str, text: &str) -> SourceDocument {
        SourceDocument {
            name: name.into(),
            format: DocumentFormat::Text,
            bytes: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn classify_capital_question_is_remember() {
        let c = classify_single("What is the capital of France?").unwrap();
        assert_eq!(c.primary(), Level::Remember);
    }

    #[test]
    fn classify_design_question_is_create() {
        let c = classify_single("Design a new product for sustainable living.").unwrap();
        assert_eq!(c.primary(), Level::Create);
    }

    #[test]
    fn classify_without_matches_defaults_to_remember() {
        let c = classify_single("xyz").unwrap();
        assert_eq!(c, Classification::Single(crate::model::LevelMatch::new(Level::Remember, 0)));
    }

    #[test]
    fn classify_explain_and_analyze_is_multi_level() {
        let c = classify_single("Explain and analyze the poem.").unwrap();
        assert!(c.is_multi_level());
        assert_eq!(c.display(), "Understand + Analyze");
    }

    #[test]
    fn classify_blank_is_empty_input() {
        assert!(matches!(classify_single("   \n"), Err(ClassifyError::EmptyInput)));
    }

    #[test]
    fn classify_is_idempotent() {
        let q = "Compare and contrast mitosis and meiosis.";
        assert_eq!(classify_single(q).unwrap(), classify_single(q).unwrap());
    }

    #[test]
    fn analyze_empty_document_finds_nothing() {
        assert!(matches!(analyze_document(""), Err(ClassifyError::NoQuestionsFound)));
    }

    #[test]
    fn analyze_counts_zero_score_questions() {
        let report = analyze_document(TEN_QUESTIONS).unwrap();
        assert_eq!(report.total_questions, 10);
        assert_eq!(report.questions.len(), 10);
        assert_eq!(report.count(Level::Remember), 5);
        for q in &report.questions[7..] {
            assert_eq!(q.scores.total(), 0);
            assert_eq!(q.level, Level::Remember);
        }
        assert_eq!(report.level_counts.values().sum::<usize>(), 10);
    }

    #[test]
    fn analyze_decoded_question_list_skips_extraction() {
        let doc = DecodedDocument::Questions(vec![
            "Define osmosis".into(),
            "   ".into(),
            "tiny".into(),
        ]);
        let report = analyze_decoded(&doc).unwrap();
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.questions[0].question, "Define osmosis");

        let empty = DecodedDocument::Questions(vec![]);
        assert!(matches!(analyze_decoded(&empty), Err(ClassifyError::NoQuestionsFound)));
    }

    #[test]
    fn analyze_source_rejects_unknown_format_and_oversized() {
        let engine = engine(1);
        let pdf = SourceDocument {
            name: "paper.pdf".into(),
            format: DocumentFormat::Pdf,
            bytes: b"%PDF-1.4".to_vec(),
        };
        assert!(matches!(
            engine.analyze_source(&pdf),
            Err(ClassifyError::UnreadableDocument { .. })
        ));

        let big = text_doc("big.txt", &"What is this? ".repeat(200));
        assert!(matches!(
            engine.analyze_source(&big),
            Err(ClassifyError::UnreadableDocument { .. })
        ));
    }

    #[tokio::test]
    async fn batch_preserves_order_and_records_failures() {
        let engine = engine(2);
        let docs = vec![
            text_doc("a.txt", "1. Define osmosis.\n2. Explain the water cycle."),
            text_doc("empty.txt", ""),
            SourceDocument {
                name: "broken.txt".into(),
                format: DocumentFormat::Text,
                bytes: vec![0xff, 0xfe, 0xfd],
            },
            text_doc("b.txt", TEN_QUESTIONS),
        ];

        let batch = engine.run(docs, &NoopReporter).await.unwrap();

        let names: Vec<&str> = batch.documents.iter().map(|d| d.source.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(batch.failures.len(), 2);
        assert_eq!(batch.failures[0].name, "empty.txt");
        assert!(batch.failures[0].error.contains("no questions"));
        assert_eq!(batch.failures[1].name, "broken.txt");
        assert_eq!(batch.total_questions(), 12);
    }
}
