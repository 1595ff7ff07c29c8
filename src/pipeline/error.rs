use thiserror::Error;

use crate::document::ExtractionError;
use crate::storage::StorageError;

/// Batch-level failures. Validation errors are raised before any document is touched.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("a job description is required")]
    MissingJobDescription,

    #[error("at least one document is required")]
    NoDocuments,

    #[error("too many documents: {count} uploaded, at most {max} allowed")]
    TooManyDocuments { count: usize, max: usize },

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// A document excluded from the results.
#[derive(Debug, Error)]
#[error("{file_name} (document {position}): {source}")]
pub struct DocumentFailure {
    /// Upload position, zero-based.
    pub position: usize,
    pub file_name: String,
    #[source]
    pub source: ExtractionError,
}
