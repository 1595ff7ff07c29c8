//! Directory-backed store.
//!
//! Layout under the root:
//! - `job_descriptions.jsonl`: one [`StoredJobDescription`] per line
//! - `results.jsonl`: one [`StoredResult`] per line
//! - `documents/<blake3>.<ext>`: archived uploads

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{IoContext, StorageError, StorageResult};
use super::{BatchReceipt, CandidateStore, StoredJobDescription, StoredResult};
use crate::document::Document;
use crate::hashing::{content_key, job_description_key};
use crate::record::{CandidateRecord, JobDescription};

const JOB_DESCRIPTIONS_FILE: &str = "job_descriptions.jsonl";
const RESULTS_FILE: &str = "results.jsonl";
const DOCUMENTS_DIR: &str = "documents";
const TEMP_EXTENSION: &str = "tmp";

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // Serializes appends from concurrent callers within one process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the root and opens the store.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = Self::new(root);
        store.ensure_dir(&store.root)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self, dir: &Path) -> StorageResult<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|_| StorageError::StorageUnavailable {
                path: dir.to_path_buf(),
            })?;
        }
        Ok(())
    }

    fn documents_dir(&self) -> PathBuf {
        self.root.join(DOCUMENTS_DIR)
    }

    fn document_path(&self, key: &str, document: &Document) -> PathBuf {
        let extension = Path::new(&document.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string());
        self.documents_dir().join(format!("{key}.{extension}"))
    }

    fn append_lines(&self, file_name: &str, lines: &[String]) -> StorageResult<()> {
        self.ensure_dir(&self.root)?;
        let path = self.root.join(file_name);

        let mut buffer = String::new();
        for line in lines {
            buffer.push_str(line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .at(&path)?;
        file.write_all(buffer.as_bytes()).at(&path)?;
        file.sync_all().at(&path)?;
        Ok(())
    }

    fn read_lines<T: DeserializeOwned>(&self, file_name: &str) -> StorageResult<Vec<T>> {
        let path = self.root.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path).at(&path)?);
        let mut rows = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.at(&path)?;
            if line.trim().is_empty() {
                continue;
            }
            let row = serde_json::from_str(&line).map_err(|e| StorageError::Corrupt {
                path: path.clone(),
                line: idx + 1,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Every stored result row, oldest batch first.
    pub fn load_results(&self) -> StorageResult<Vec<StoredResult>> {
        self.read_lines(RESULTS_FILE)
    }

    /// Raw bytes of an archived document, if present.
    pub fn load_document(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let dir = self.documents_dir();
        if !dir.exists() {
            return Ok(None);
        }

        for entry in fs::read_dir(&dir).at(&dir)? {
            let path = entry.at(&dir)?.path();
            if let Some(stem) = path.file_stem()
                && stem == key
                && path.extension().is_some_and(|ext| ext != TEMP_EXTENSION)
            {
                return fs::read(&path).at(&path).map(Some);
            }
        }
        Ok(None)
    }
}

impl CandidateStore for FileStore {
    fn save_job_description(&self, job: &JobDescription) -> StorageResult<String> {
        let key = job_description_key(job.as_str());
        let _guard = self.write_lock.lock();

        let existing: Vec<StoredJobDescription> = self.read_lines(JOB_DESCRIPTIONS_FILE)?;
        if existing.iter().any(|stored| stored.key == key) {
            debug!(key = %key, "Job description already stored");
            return Ok(key);
        }

        let row = StoredJobDescription {
            key: key.clone(),
            text: job.clone(),
            created_at: Utc::now(),
        };
        self.append_lines(JOB_DESCRIPTIONS_FILE, &[serde_json::to_string(&row)?])?;
        info!(key = %key, "Job description stored");
        Ok(key)
    }

    fn list_job_descriptions(&self) -> StorageResult<Vec<StoredJobDescription>> {
        self.read_lines(JOB_DESCRIPTIONS_FILE)
    }

    fn archive_document(&self, document: &Document) -> StorageResult<String> {
        let key = content_key(&document.bytes);
        let final_path = self.document_path(&key, document);

        if final_path.exists() {
            debug!(file_name = %document.file_name, key = %key, "Document already archived");
            return Ok(key);
        }

        self.ensure_dir(&self.documents_dir())?;
        let temp_path = final_path.with_extension(TEMP_EXTENSION);
        {
            let mut file = File::create(&temp_path).at(&temp_path)?;
            file.write_all(&document.bytes).at(&temp_path)?;
            file.sync_all().at(&temp_path)?;
        }
        fs::rename(&temp_path, &final_path).at(&final_path)?;

        debug!(
            file_name = %document.file_name,
            key = %key,
            bytes = document.bytes.len(),
            "Document archived"
        );
        Ok(key)
    }

    fn save_results(
        &self,
        job: &JobDescription,
        records: &[CandidateRecord],
    ) -> StorageResult<BatchReceipt> {
        let receipt = BatchReceipt {
            batch_id: Uuid::new_v4(),
            created_at: Utc::now(),
            rows: records.len(),
        };
        let job_key = job_description_key(job.as_str());

        let lines = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                serde_json::to_string(&StoredResult {
                    batch_id: receipt.batch_id,
                    created_at: receipt.created_at,
                    job_key: job_key.clone(),
                    position,
                    record: record.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let _guard = self.write_lock.lock();
        self.append_lines(RESULTS_FILE, &lines)?;

        info!(
            batch_id = %receipt.batch_id,
            rows = receipt.rows,
            "Batch results stored"
        );
        Ok(receipt)
    }
}
