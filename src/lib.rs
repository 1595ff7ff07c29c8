//! Shortlist library crate (used by the CLI and integration tests).
//!
//! Matches CVs against a job description. Each document goes through
//! text extraction ([`document`]), field extraction ([`fields`]), summarization
//! ([`summarize`]) and embedding similarity ([`scoring`]); [`pipeline`] runs a whole
//! batch and hands the records to [`storage`] and [`export`].
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`CandidateRecord`], [`CandidateFields`], [`Decision`], [`JobDescription`] - Result rows
//! - [`Pipeline`], [`BatchReport`], [`BatchError`] - Batch orchestration
//!
//! ## Models
//! - [`ModelSet`] - Process-wide model handles
//! - [`TextEmbedder`], [`EntityTagger`], [`TextGenerator`] - Model seams, each with a stub backend
//!
//! ## Collaborators
//! - [`CandidateStore`], [`FileStore`] - Persistence
//! - [`export_csv`] - Spreadsheet export
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod document;
pub mod export;
pub mod fields;
pub mod hashing;
pub mod inference;
pub mod pipeline;
pub mod record;
pub mod scoring;
pub mod storage;
pub mod summarize;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_SELECTION_THRESHOLD, SENTINEL};
pub use document::{Document, DocumentTextExtractor, ExtractionError, TextExtractor};
pub use export::{ExportError, export_csv};
pub use fields::{FieldError, FieldExtractor, FieldWarning};
pub use hashing::{content_key, hash_to_u64, job_description_key};
pub use inference::{
    EntityTagger, InferenceError, ModelSet, SentenceEmbedder, Seq2SeqGenerator, TextEmbedder,
    TextGenerator, TokenTagger,
};
#[cfg(any(test, feature = "mock"))]
pub use inference::{MockEmbedder, MockGenerator, MockTagger};
pub use pipeline::{BatchError, BatchReport, BatchState, DocumentFailure, Pipeline};
pub use record::{CandidateFields, CandidateRecord, Decision, JobDescription};
pub use scoring::{MatchScore, ScoringError, SimilarityScorer, cosine_similarity};
#[cfg(any(test, feature = "mock"))]
pub use storage::MockStore;
pub use storage::{CandidateStore, FileStore, StorageError, StoredJobDescription};
pub use summarize::Summarizer;
