//! Batch orchestration: text → fields + summary → score → decision.
//!
//! A batch moves `Idle → Processing → Done`. Documents run one after another in upload
//! order. A document that cannot be read is reported and left out; everything else about
//! it (field misses, summarizer or embedder failures) degrades to defaults and warnings.

mod error;

#[cfg(test)]
mod tests;

pub use error::{BatchError, DocumentFailure};

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::document::{Document, DocumentTextExtractor, ExtractionError, TextExtractor};
use crate::fields::{FieldExtractor, FieldWarning};
use crate::inference::ModelSet;
use crate::record::{CandidateRecord, Decision, JobDescription};
use crate::scoring::SimilarityScorer;
use crate::storage::CandidateStore;
use crate::summarize::Summarizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Processing,
    Done,
}

/// Something that went wrong inside a document without excluding it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchWarning {
    pub file_name: String,
    pub message: String,
}

impl std::fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

/// Terminal state of a batch.
#[derive(Debug)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub job_key: String,
    /// One record per readable document, in upload order.
    pub records: Vec<CandidateRecord>,
    pub failures: Vec<DocumentFailure>,
    pub warnings: Vec<BatchWarning>,
}

impl BatchReport {
    pub fn selected_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.decision().is_selected())
            .count()
    }

    /// Selected first, then by descending score. Upload order breaks ties.
    pub fn ranked(&self) -> Vec<&CandidateRecord> {
        let mut ranked: Vec<&CandidateRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| {
            let selected = |r: &CandidateRecord| r.decision() == Decision::Selected;
            selected(b).cmp(&selected(a)).then(
                b.match_score()
                    .partial_cmp(&a.match_score())
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        ranked
    }
}

/// Result of processing a single document.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub record: CandidateRecord,
    pub warnings: Vec<BatchWarning>,
}

pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    fields: FieldExtractor,
    summarizer: Summarizer,
    scorer: SimilarityScorer,
    store: Arc<dyn CandidateStore>,
    max_documents: usize,
    state: Mutex<BatchState>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("fields", &self.fields)
            .field("summarizer", &self.summarizer)
            .field("scorer", &self.scorer)
            .field("max_documents", &self.max_documents)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl Pipeline {
    pub fn new(models: &ModelSet, config: &Config, store: Arc<dyn CandidateStore>) -> Self {
        Self {
            extractor: Arc::new(DocumentTextExtractor::new()),
            fields: FieldExtractor::from_models(models, config),
            summarizer: Summarizer::new(Arc::clone(&models.summarizer)),
            scorer: SimilarityScorer::new(
                Arc::clone(&models.embedder),
                config.selection_threshold,
            ),
            store,
            max_documents: config.max_documents,
            state: Mutex::new(BatchState::Idle),
        }
    }

    /// Replaces the default PDF/plain-text extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn state(&self) -> BatchState {
        *self.state.lock()
    }

    fn set_state(&self, state: BatchState) {
        debug!(?state, "Batch state");
        *self.state.lock() = state;
    }

    fn validate(&self, job_text: &str, documents: &[Document]) -> Result<JobDescription, BatchError> {
        let job = JobDescription::new(job_text).ok_or(BatchError::MissingJobDescription)?;
        if documents.is_empty() {
            return Err(BatchError::NoDocuments);
        }
        if documents.len() > self.max_documents {
            return Err(BatchError::TooManyDocuments {
                count: documents.len(),
                max: self.max_documents,
            });
        }
        Ok(job)
    }

    /// Text → record for one document. Only an unreadable document is an error.
    pub fn process_document(
        &self,
        job: &JobDescription,
        document: &Document,
    ) -> Result<DocumentOutcome, ExtractionError> {
        let text = self.extractor.extract(document)?;

        let (fields, field_warnings) = self.fields.extract_all(&text);
        let summary = self.summarizer.summarize(&text);
        let score = self.scorer.match_score(job.as_str(), &summary);

        let mut warnings: Vec<BatchWarning> = field_warnings
            .iter()
            .map(|w: &FieldWarning| BatchWarning {
                file_name: document.file_name.clone(),
                message: w.to_string(),
            })
            .collect();
        if let Some(reason) = &score.error {
            warnings.push(BatchWarning {
                file_name: document.file_name.clone(),
                message: format!("scoring failed: {reason}"),
            });
        }

        let record =
            CandidateRecord::scored(fields, summary, document.file_name.clone(), &score);

        debug!(
            file_name = %document.file_name,
            name = %record.name(),
            score = record.match_score(),
            decision = %record.decision(),
            "Document processed"
        );

        Ok(DocumentOutcome { record, warnings })
    }

    /// Validates, archives, processes every document in order and persists the results.
    ///
    /// Storage failures abort the batch; per-document failures never do.
    pub fn run(&self, job_text: &str, documents: Vec<Document>) -> Result<BatchReport, BatchError> {
        let job = self.validate(job_text, &documents)?;

        self.set_state(BatchState::Processing);
        let result = self.process_batch(&job, &documents);
        self.set_state(match &result {
            Ok(_) => BatchState::Done,
            Err(_) => BatchState::Idle,
        });
        result
    }

    fn process_batch(
        &self,
        job: &JobDescription,
        documents: &[Document],
    ) -> Result<BatchReport, BatchError> {
        info!(documents = documents.len(), "Batch started");

        let job_key = self.store.save_job_description(job)?;
        for document in documents {
            self.store.archive_document(document)?;
        }

        let mut records = Vec::with_capacity(documents.len());
        let mut failures = Vec::new();
        let mut warnings = Vec::new();

        for (position, document) in documents.iter().enumerate() {
            match self.process_document(job, document) {
                Ok(outcome) => {
                    records.push(outcome.record);
                    warnings.extend(outcome.warnings);
                }
                Err(source) => {
                    warn!(
                        file_name = %document.file_name,
                        position,
                        error = %source,
                        "Document skipped"
                    );
                    failures.push(DocumentFailure {
                        position,
                        file_name: document.file_name.clone(),
                        source,
                    });
                }
            }
        }

        let receipt = self.store.save_results(job, &records)?;

        let report = BatchReport {
            batch_id: receipt.batch_id,
            job_key,
            records,
            failures,
            warnings,
        };

        info!(
            batch_id = %report.batch_id,
            processed = report.records.len(),
            skipped = report.failures.len(),
            selected = report.selected_count(),
            warnings = report.warnings.len(),
            "Batch done"
        );

        Ok(report)
    }
}
