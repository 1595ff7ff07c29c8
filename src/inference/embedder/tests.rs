use super::*;
use crate::scoring::cosine_similarity;
use std::path::PathBuf;

mod config_tests {
    use super::*;

    #[test]
    fn test_embedder_config_default() {
        let config = EmbedderConfig::default();
        assert!(config.model_path.is_none());
        assert!(config.is_stub());
        assert_eq!(config.embedding_dim, 384);
        assert_eq!(config.max_seq_len, 512);
    }

    #[test]
    fn test_embedder_config_new() {
        let config = EmbedderConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(
            config.model_path,
            Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
        );
        assert!(!config.is_stub());
    }

    #[test]
    fn test_embedder_config_validate_zero_dim() {
        let config = EmbedderConfig::stub().with_embedding_dim(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_embedder_config_validate_seq_len_too_long() {
        let config = EmbedderConfig {
            max_seq_len: 4096,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_embedder_config_validate_empty_path() {
        let config = EmbedderConfig::new("");
        assert!(config.validate().is_err());
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_load() {
        let embedder = SentenceEmbedder::stub().unwrap();
        assert!(embedder.is_stub());
        assert_eq!(embedder.embedding_dim(), 384);
        assert!(format!("{:?}", embedder).contains("Stub"));
    }

    #[test]
    fn test_stub_embedding_dimension() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("Senior Rust engineer").unwrap();
        assert_eq!(embedding.len(), 384);
    }

    #[test]
    fn test_stub_embedding_is_normalized() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("Python developer with AWS experience").unwrap();
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_embedding_deterministic() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let a = embedder.embed("Backend engineer, Go and Rust").unwrap();
        let b = embedder.embed("Backend engineer, Go and Rust").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_embedding_case_insensitive() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let a = embedder.embed("PYTHON Django").unwrap();
        let b = embedder.embed("python django").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("   ").unwrap();
        assert!(embedding.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_stub_shared_vocabulary_scores_higher() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let jd = embedder
            .embed("python django postgresql backend developer")
            .unwrap();
        let close = embedder
            .embed("backend developer using python django and postgresql")
            .unwrap();
        let far = embedder
            .embed("registered nurse intensive care unit shifts")
            .unwrap();

        assert!(cosine_similarity(&jd, &close) > cosine_similarity(&jd, &far));
    }

    #[test]
    fn test_stub_custom_dimension() {
        let embedder =
            SentenceEmbedder::load(EmbedderConfig::stub().with_embedding_dim(64)).unwrap();
        assert_eq!(embedder.embed("rust").unwrap().len(), 64);
    }
}

mod model_tests {
    use super::*;

    #[test]
    fn test_load_missing_model_dir() {
        let result = SentenceEmbedder::load(EmbedderConfig::new("/nonexistent/minilm"));
        assert!(matches!(result, Err(InferenceError::ModelNotFound { .. })));
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }
}
