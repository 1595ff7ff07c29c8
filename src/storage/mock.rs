//! In-memory [`CandidateStore`] for tests.

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use super::error::{StorageError, StorageResult};
use super::{BatchReceipt, CandidateStore, StoredJobDescription, StoredResult};
use crate::document::Document;
use crate::hashing::{content_key, job_description_key};
use crate::record::{CandidateRecord, JobDescription};

#[derive(Debug, Default)]
pub struct MockStore {
    jobs: Mutex<Vec<StoredJobDescription>>,
    documents: Mutex<Vec<(String, String)>>,
    results: Mutex<Vec<StoredResult>>,
    fail_results: bool,
    fail_archive: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `save_results` always fails.
    pub fn failing_results() -> Self {
        Self {
            fail_results: true,
            ..Default::default()
        }
    }

    /// `archive_document` always fails.
    pub fn failing_archive() -> Self {
        Self {
            fail_archive: true,
            ..Default::default()
        }
    }

    /// Archived `(file_name, key)` pairs in archive order.
    pub fn documents(&self) -> Vec<(String, String)> {
        self.documents.lock().clone()
    }

    pub fn results(&self) -> Vec<StoredResult> {
        self.results.lock().clone()
    }
}

impl CandidateStore for MockStore {
    fn save_job_description(&self, job: &JobDescription) -> StorageResult<String> {
        let key = job_description_key(job.as_str());
        let mut jobs = self.jobs.lock();
        if !jobs.iter().any(|stored| stored.key == key) {
            jobs.push(StoredJobDescription {
                key: key.clone(),
                text: job.clone(),
                created_at: Utc::now(),
            });
        }
        Ok(key)
    }

    fn list_job_descriptions(&self) -> StorageResult<Vec<StoredJobDescription>> {
        Ok(self.jobs.lock().clone())
    }

    fn archive_document(&self, document: &Document) -> StorageResult<String> {
        if self.fail_archive {
            return Err(StorageError::WriteFailed("mock archive failure".to_string()));
        }
        let key = content_key(&document.bytes);
        self.documents
            .lock()
            .push((document.file_name.clone(), key.clone()));
        Ok(key)
    }

    fn save_results(
        &self,
        job: &JobDescription,
        records: &[CandidateRecord],
    ) -> StorageResult<BatchReceipt> {
        if self.fail_results {
            return Err(StorageError::WriteFailed("mock results failure".to_string()));
        }
        let receipt = BatchReceipt {
            batch_id: Uuid::new_v4(),
            created_at: Utc::now(),
            rows: records.len(),
        };
        let job_key = job_description_key(job.as_str());
        self.results
            .lock()
            .extend(records.iter().enumerate().map(|(position, record)| StoredResult {
                batch_id: receipt.batch_id,
                created_at: receipt.created_at,
                job_key: job_key.clone(),
                position,
                record: record.clone(),
            }));
        Ok(receipt)
    }
}
