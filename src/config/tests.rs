use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_shortlist_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SHORTLIST_EMBEDDER_PATH");
        env::remove_var("SHORTLIST_TAGGER_PATH");
        env::remove_var("SHORTLIST_SUMMARIZER_PATH");
        env::remove_var("SHORTLIST_GENERATOR_PATH");
        env::remove_var("SHORTLIST_STORAGE_PATH");
        env::remove_var("SHORTLIST_EXPORT_PATH");
        env::remove_var("SHORTLIST_SELECTION_THRESHOLD");
        env::remove_var("SHORTLIST_SKILL_ENTITY_GROUP");
        env::remove_var("SHORTLIST_PERSON_ENTITY_GROUP");
        env::remove_var("SHORTLIST_MAX_DOCUMENTS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.embedder_path.is_none());
    assert!(config.tagger_path.is_none());
    assert!(config.summarizer_path.is_none());
    assert!(config.generator_path.is_none());
    assert_eq!(config.storage_path, PathBuf::from("./.data"));
    assert_eq!(
        config.export_path,
        PathBuf::from("output/shortlisted_candidates.csv")
    );
    assert_eq!(config.selection_threshold, 50.0);
    assert_eq!(config.skill_entity_group, "MISC");
    assert_eq!(config.person_entity_group, "PER");
    assert_eq!(config.max_documents, 25);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_shortlist_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.selection_threshold, 50.0);
    assert_eq!(config.max_documents, 25);
    assert!(config.embedder_path.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_threshold() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_SELECTION_THRESHOLD", "65.5")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.selection_threshold, 65.5);
    });
}

#[test]
#[serial]
fn test_from_env_invalid_threshold() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_SELECTION_THRESHOLD", "half")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::ThresholdParseError { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_nan_threshold() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_SELECTION_THRESHOLD", "NaN")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidThreshold { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_entity_groups() {
    clear_shortlist_env();

    with_env_vars(
        &[
            ("SHORTLIST_SKILL_ENTITY_GROUP", " SKILL "),
            ("SHORTLIST_PERSON_ENTITY_GROUP", "PERSON"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.skill_entity_group, "SKILL");
            assert_eq!(config.person_entity_group, "PERSON");
        },
    );
}

#[test]
#[serial]
fn test_from_env_empty_entity_group_rejected() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_SKILL_ENTITY_GROUP", "  ")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::EmptyEntityGroup { name: "skills" })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_max_documents() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_MAX_DOCUMENTS", "3")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.max_documents, 3);
    });

    with_env_vars(&[("SHORTLIST_MAX_DOCUMENTS", "0")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidMaxDocuments { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_generator_defaults_to_summarizer() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_SUMMARIZER_PATH", "/models/flan-t5-base")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.summarizer_path,
            Some(PathBuf::from("/models/flan-t5-base"))
        );
        assert_eq!(config.generator_path, config.summarizer_path);
    });
}

#[test]
#[serial]
fn test_from_env_blank_model_path_is_none() {
    clear_shortlist_env();

    with_env_vars(&[("SHORTLIST_EMBEDDER_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.embedder_path.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_storage_and_export_paths() {
    clear_shortlist_env();

    with_env_vars(
        &[
            ("SHORTLIST_STORAGE_PATH", "/var/lib/shortlist"),
            ("SHORTLIST_EXPORT_PATH", "/tmp/out.csv"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.storage_path, PathBuf::from("/var/lib/shortlist"));
            assert_eq!(config.export_path, PathBuf::from("/tmp/out.csv"));
        },
    );
}

#[test]
fn test_validate_default_ok() {
    let config = Config {
        storage_path: PathBuf::from("/nonexistent/shortlist-data"),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_storage_path_is_file() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let config = Config {
        storage_path: file.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_export_path_is_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config {
        storage_path: dir.path().join("data"),
        export_path: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        storage_path: PathBuf::from("/nonexistent/shortlist-data"),
        embedder_path: Some(PathBuf::from("/nonexistent/minilm")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_model_path_is_file() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let config = Config {
        storage_path: PathBuf::from("/nonexistent/shortlist-data"),
        tagger_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_infinite_threshold() {
    let config = Config {
        storage_path: PathBuf::from("/nonexistent/shortlist-data"),
        selection_threshold: f32::INFINITY,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold { .. })
    ));
}

#[test]
fn test_error_display() {
    let err = ConfigError::EmptyEntityGroup { name: "skills" };
    assert_eq!(err.to_string(), "entity group for skills cannot be empty");

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/models/missing"),
    };
    assert!(err.to_string().contains("/models/missing"));
}
