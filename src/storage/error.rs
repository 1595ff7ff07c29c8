use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Storage failures. These propagate: a batch is not durable without its storage writes.
pub enum StorageError {
    /// IO error on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored line could not be decoded.
    #[error("corrupt row in {path} at line {line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Storage root is missing and could not be created.
    #[error("storage path unavailable: {path}")]
    StorageUnavailable { path: PathBuf },

    /// Backend refused the write (used by test doubles).
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

pub(crate) trait IoContext<T> {
    fn at(self, path: &std::path::Path) -> StorageResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: &std::path::Path) -> StorageResult<T> {
        self.map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
