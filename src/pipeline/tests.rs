use super::*;
use crate::inference::{MockEmbedder, MockGenerator, MockTagger};
use crate::storage::MockStore;

const JD: &str = "Senior Rust engineer";

fn models(embedder: MockEmbedder) -> ModelSet {
    ModelSet {
        embedder: Arc::new(embedder),
        tagger: Arc::new(MockTagger::new()),
        summarizer: Arc::new(MockGenerator::new("Rust engineer summary")),
        generator: Arc::new(MockGenerator::new("").as_stub()),
    }
}

fn pipeline_with(embedder: MockEmbedder, store: Arc<MockStore>) -> Pipeline {
    Pipeline::new(&models(embedder), &Config::default(), store)
}

fn matching_embedder() -> MockEmbedder {
    MockEmbedder::new(vec![1.0, 0.0])
        .with_vector(JD, vec![1.0, 0.0])
        .with_vector("Rust engineer summary", vec![0.8, 0.6])
}

fn cv(name: &str) -> Document {
    Document::new(
        format!("{}.txt", name.to_lowercase().replace(' ', "_")),
        format!("Name: {name}\nEmail: {}@example.com\n5 years of Rust and SQL", name.to_lowercase().replace(' ', ".")),
    )
}

fn corrupted(file_name: &str) -> Document {
    Document::new(file_name, b"%PDF-1.4 garbage that is not a pdf".to_vec())
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_missing_job_description() {
        let store = Arc::new(MockStore::new());
        let pipeline = pipeline_with(matching_embedder(), Arc::clone(&store));
        let err = pipeline.run("   ", vec![cv("Jane Doe")]).unwrap_err();
        assert!(matches!(err, BatchError::MissingJobDescription));
        assert_eq!(pipeline.state(), BatchState::Idle);
        assert!(store.list_job_descriptions().unwrap().is_empty());
    }

    #[test]
    fn test_no_documents() {
        let store = Arc::new(MockStore::new());
        let pipeline = pipeline_with(matching_embedder(), Arc::clone(&store));
        assert!(matches!(
            pipeline.run(JD, vec![]).unwrap_err(),
            BatchError::NoDocuments
        ));
        assert!(store.list_job_descriptions().unwrap().is_empty());
    }

    #[test]
    fn test_too_many_documents() {
        let config = Config {
            max_documents: 2,
            ..Config::default()
        };
        let pipeline = Pipeline::new(
            &models(matching_embedder()),
            &config,
            Arc::new(MockStore::new()),
        );
        let docs = vec![cv("Ana Silva"), cv("Ben Okafor"), cv("Cy Young")];
        assert!(matches!(
            pipeline.run(JD, docs).unwrap_err(),
            BatchError::TooManyDocuments { count: 3, max: 2 }
        ));
    }
}

mod batch_tests {
    use super::*;

    #[test]
    fn test_corrupted_document_isolated() {
        let store = Arc::new(MockStore::new());
        let pipeline = pipeline_with(matching_embedder(), Arc::clone(&store));

        let report = pipeline
            .run(
                JD,
                vec![cv("Jane Doe"), corrupted("broken.pdf"), cv("Sam Lee")],
            )
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].source_file(), "jane_doe.txt");
        assert_eq!(report.records[1].source_file(), "sam_lee.txt");

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 1);
        assert_eq!(report.failures[0].file_name, "broken.pdf");
        assert!(matches!(
            report.failures[0].source,
            ExtractionError::Unreadable { .. }
        ));

        assert_eq!(pipeline.state(), BatchState::Done);
        assert_eq!(store.results().len(), 2);
    }

    #[test]
    fn test_record_fields_and_decision() {
        let pipeline = pipeline_with(matching_embedder(), Arc::new(MockStore::new()));
        let report = pipeline.run(JD, vec![cv("Jane Doe")]).unwrap();

        let record = &report.records[0];
        assert_eq!(record.name(), "Jane Doe");
        assert_eq!(record.email(), "jane.doe@example.com");
        assert_eq!(record.experience(), "5 years");
        assert_eq!(record.summary(), "Rust engineer summary");
        assert!((record.match_score() - 80.0).abs() < 1e-3);
        assert_eq!(record.decision(), Decision::Selected);
        assert_eq!(report.selected_count(), 1);
    }

    #[test]
    fn test_embedding_failure_rejects_with_warning() {
        let pipeline = pipeline_with(MockEmbedder::failing(), Arc::new(MockStore::new()));
        let report = pipeline.run(JD, vec![cv("Jane Doe")]).unwrap();

        assert_eq!(report.records[0].match_score(), 0.0);
        assert_eq!(report.records[0].decision(), Decision::Rejected);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.message.starts_with("scoring failed"))
        );
    }

    #[test]
    fn test_embedding_failure_rejected_at_zero_threshold() {
        let config = Config {
            selection_threshold: 0.0,
            ..Config::default()
        };
        let store = Arc::new(MockStore::new());
        let pipeline = Pipeline::new(
            &models(MockEmbedder::failing()),
            &config,
            Arc::clone(&store) as Arc<dyn CandidateStore>,
        );
        let report = pipeline.run(JD, vec![cv("Jane Doe")]).unwrap();

        assert_eq!(report.records[0].match_score(), 0.0);
        assert_eq!(report.records[0].decision(), Decision::Rejected);
        assert_eq!(store.results()[0].record.decision(), Decision::Rejected);
    }

    #[test]
    fn test_summarizer_failure_uses_fixed_message() {
        let models = ModelSet {
            summarizer: Arc::new(MockGenerator::failing()),
            ..models(matching_embedder())
        };
        let pipeline = Pipeline::new(&models, &Config::default(), Arc::new(MockStore::new()));
        let report = pipeline.run(JD, vec![cv("Jane Doe")]).unwrap();
        assert_eq!(report.records[0].summary(), "Error during summarization.");
    }

    #[test]
    fn test_all_documents_unreadable_still_done() {
        let store = Arc::new(MockStore::new());
        let pipeline = pipeline_with(matching_embedder(), Arc::clone(&store));
        let report = pipeline
            .run(JD, vec![corrupted("a.pdf"), Document::new("b.docx", "PK")])
            .unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(pipeline.state(), BatchState::Done);
    }

    #[test]
    fn test_archives_job_and_documents() {
        let store = Arc::new(MockStore::new());
        let pipeline = pipeline_with(matching_embedder(), Arc::clone(&store));
        pipeline
            .run(JD, vec![cv("Jane Doe"), corrupted("broken.pdf")])
            .unwrap();

        assert_eq!(store.list_job_descriptions().unwrap().len(), 1);
        let archived: Vec<_> = store.documents().into_iter().map(|(name, _)| name).collect();
        assert_eq!(archived, ["jane_doe.txt", "broken.pdf"]);
    }

    #[test]
    fn test_storage_failure_propagates() {
        let pipeline = pipeline_with(
            matching_embedder(),
            Arc::new(MockStore::failing_results()),
        );
        let err = pipeline.run(JD, vec![cv("Jane Doe")]).unwrap_err();
        assert!(matches!(err, BatchError::Storage(_)));
        assert_eq!(pipeline.state(), BatchState::Idle);
    }

    #[test]
    fn test_archive_failure_propagates() {
        let pipeline = pipeline_with(
            matching_embedder(),
            Arc::new(MockStore::failing_archive()),
        );
        assert!(matches!(
            pipeline.run(JD, vec![cv("Jane Doe")]),
            Err(BatchError::Storage(_))
        ));
    }

    #[test]
    fn test_same_document_twice_same_fields() {
        let pipeline = pipeline_with(matching_embedder(), Arc::new(MockStore::new()));
        let job = JobDescription::new(JD).unwrap();
        let first = pipeline.process_document(&job, &cv("Jane Doe")).unwrap();
        let second = pipeline.process_document(&job, &cv("Jane Doe")).unwrap();
        assert_eq!(first.record, second.record);
    }
}

mod ranking_tests {
    use super::*;
    use crate::record::CandidateFields;

    fn record(file: &str, score: f32) -> CandidateRecord {
        CandidateRecord::new(
            CandidateFields {
                name: file.to_string(),
                experience: "N/A".to_string(),
                phone: "N/A".to_string(),
                email: "N/A".to_string(),
                skills: Default::default(),
                education: "N/A".to_string(),
            },
            String::new(),
            file.to_string(),
            score,
            50.0,
        )
    }

    #[test]
    fn test_ranked_selected_first_then_score() {
        let report = BatchReport {
            batch_id: Uuid::new_v4(),
            job_key: String::new(),
            records: vec![
                record("a", 30.0),
                record("b", 55.0),
                record("c", -10.0),
                record("d", 90.0),
            ],
            failures: vec![],
            warnings: vec![],
        };

        let order: Vec<_> = report
            .ranked()
            .into_iter()
            .map(|r| r.source_file())
            .collect();
        assert_eq!(order, ["d", "b", "a", "c"]);
        assert_eq!(report.records[0].source_file(), "a");
        assert_eq!(report.selected_count(), 2);
    }
}
