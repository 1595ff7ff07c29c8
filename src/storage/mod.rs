//! Persistence for job descriptions, uploaded documents and batch results.

pub mod error;
pub mod file;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;
use crate::record::{CandidateRecord, JobDescription};

/// A job description as stored, keyed by the BLAKE3 hash of its trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredJobDescription {
    pub key: String,
    pub text: JobDescription,
    pub created_at: DateTime<Utc>,
}

/// One persisted result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_key: String,
    /// Upload position within the batch.
    pub position: usize,
    pub record: CandidateRecord,
}

/// Identifies a persisted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReceipt {
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub rows: usize,
}

/// Storage collaborator of the pipeline.
pub trait CandidateStore: Send + Sync {
    /// Saves `job` unless an identical one is already stored; returns its key either way.
    fn save_job_description(&self, job: &JobDescription) -> StorageResult<String>;

    /// Stored job descriptions, oldest first.
    fn list_job_descriptions(&self) -> StorageResult<Vec<StoredJobDescription>>;

    /// Archives raw document bytes; returns the content key.
    fn archive_document(&self, document: &Document) -> StorageResult<String>;

    /// Persists one row per record, in the order given.
    fn save_results(
        &self,
        job: &JobDescription,
        records: &[CandidateRecord],
    ) -> StorageResult<BatchReceipt>;
}
