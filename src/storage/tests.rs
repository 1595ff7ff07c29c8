use std::collections::BTreeSet;

use tempfile::TempDir;

use super::*;
use crate::record::CandidateFields;

fn record(name: &str, score: f32) -> CandidateRecord {
    CandidateRecord::new(
        CandidateFields {
            name: name.to_string(),
            experience: "N/A".to_string(),
            phone: "N/A".to_string(),
            email: "N/A".to_string(),
            skills: BTreeSet::from(["SQL".to_string()]),
            education: "N/A".to_string(),
        },
        "summary".to_string(),
        format!("{}.pdf", name.to_lowercase()),
        score,
        50.0,
    )
}

fn job(text: &str) -> JobDescription {
    JobDescription::new(text).unwrap()
}

fn store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("data")).unwrap();
    (dir, store)
}

mod file_store_tests {
    use super::*;

    #[test]
    fn test_open_creates_root() {
        let (_dir, store) = store();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (_dir, store) = store();
        assert!(store.list_job_descriptions().unwrap().is_empty());
        assert!(store.load_results().unwrap().is_empty());
        assert!(store.load_document("missing").unwrap().is_none());
    }

    #[test]
    fn test_job_descriptions_deduplicated() {
        let (_dir, store) = store();
        let first = store.save_job_description(&job("Rust engineer")).unwrap();
        let again = store
            .save_job_description(&job("  Rust engineer\n"))
            .unwrap();
        store.save_job_description(&job("Data analyst")).unwrap();

        assert_eq!(first, again);
        let listed = store.list_job_descriptions().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].text.as_str(), "Rust engineer");
        assert_eq!(listed[1].text.as_str(), "Data analyst");
    }

    #[test]
    fn test_job_descriptions_survive_reopen() {
        let dir = TempDir::new().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .save_job_description(&job("Rust engineer"))
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.list_job_descriptions().unwrap().len(), 1);
    }

    #[test]
    fn test_archive_document_content_addressed() {
        let (_dir, store) = store();
        let doc = Document::new("jane.pdf", b"%PDF-1.7 jane".to_vec());

        let key = store.archive_document(&doc).unwrap();
        assert_eq!(key, crate::hashing::content_key(&doc.bytes));
        assert!(store.root().join("documents").join(format!("{key}.pdf")).exists());
        assert_eq!(store.load_document(&key).unwrap().unwrap(), doc.bytes);

        let renamed = Document::new("copy.pdf", doc.bytes.clone());
        assert_eq!(store.archive_document(&renamed).unwrap(), key);
    }

    #[test]
    fn test_save_results_keeps_order() {
        let (_dir, store) = store();
        let jd = job("Rust engineer");
        let records = vec![record("Ana", 20.0), record("Ben", 80.0), record("Cy", 55.0)];

        let receipt = store.save_results(&jd, &records).unwrap();
        assert_eq!(receipt.rows, 3);

        let rows = store.load_results().unwrap();
        assert_eq!(rows.len(), 3);
        let names: Vec<_> = rows.iter().map(|r| r.record.name()).collect();
        assert_eq!(names, ["Ana", "Ben", "Cy"]);
        assert!(rows.iter().all(|r| r.batch_id == receipt.batch_id));
        assert_eq!(rows[2].position, 2);
        assert_eq!(rows[0].job_key, crate::hashing::job_description_key("Rust engineer"));
    }

    #[test]
    fn test_batches_get_distinct_ids() {
        let (_dir, store) = store();
        let jd = job("Rust engineer");
        let a = store.save_results(&jd, &[record("Ana", 60.0)]).unwrap();
        let b = store.save_results(&jd, &[record("Ben", 40.0)]).unwrap();
        assert_ne!(a.batch_id, b.batch_id);
        assert_eq!(store.load_results().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_row_reported() {
        let (_dir, store) = store();
        std::fs::write(store.root().join("job_descriptions.jsonl"), "{not json}\n").unwrap();
        let err = store.list_job_descriptions().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn test_unwritable_root_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(blocker.join("nested"));
        assert!(store.save_job_description(&job("Rust engineer")).is_err());
    }
}

mod mock_store_tests {
    use super::*;

    #[test]
    fn test_mock_dedupes_jobs() {
        let store = MockStore::new();
        store.save_job_description(&job("A")).unwrap();
        store.save_job_description(&job("A ")).unwrap();
        assert_eq!(store.list_job_descriptions().unwrap().len(), 1);
    }

    #[test]
    fn test_mock_failures() {
        let store = MockStore::failing_results();
        assert!(matches!(
            store.save_results(&job("A"), &[]),
            Err(StorageError::WriteFailed(_))
        ));

        let store = MockStore::failing_archive();
        assert!(store.archive_document(&Document::new("a.txt", "a")).is_err());
    }
}
