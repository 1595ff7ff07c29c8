//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SHORTLIST_*` environment variables;
//! the binary layers its command-line flags on top.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_MAX_DOCUMENTS, DEFAULT_PERSON_ENTITY_GROUP, DEFAULT_SELECTION_THRESHOLD,
    DEFAULT_SKILL_ENTITY_GROUP,
};

/// Pipeline configuration loaded from environment variables.
///
/// Model paths left unset run the matching model in stub mode.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sentence-embedding model directory (BERT + tokenizer).
    pub embedder_path: Option<PathBuf>,

    /// Token-classification (NER) model directory.
    pub tagger_path: Option<PathBuf>,

    /// Seq2seq model directory used for summaries.
    pub summarizer_path: Option<PathBuf>,

    /// Seq2seq model directory used for the education fallback.
    /// Defaults to the summarizer model when unset.
    pub generator_path: Option<PathBuf>,

    /// Directory for archived job descriptions, documents and results. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Spreadsheet export target. Default: `output/shortlisted_candidates.csv`.
    pub export_path: PathBuf,

    /// Match score at or above which a candidate is Selected. Default: `50`.
    pub selection_threshold: f32,

    /// Entity group collected as skills. Default: `MISC`.
    pub skill_entity_group: String,

    /// Entity group collected as person names. Default: `PER`.
    pub person_entity_group: String,

    /// Maximum documents per batch. Default: `25`.
    pub max_documents: usize,
}

/// Default export path used when `SHORTLIST_EXPORT_PATH` is not set.
pub const DEFAULT_EXPORT_PATH: &str = "output/shortlisted_candidates.csv";

impl Default for Config {
    fn default() -> Self {
        Self {
            embedder_path: None,
            tagger_path: None,
            summarizer_path: None,
            generator_path: None,
            storage_path: PathBuf::from("./.data"),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            selection_threshold: DEFAULT_SELECTION_THRESHOLD,
            skill_entity_group: DEFAULT_SKILL_ENTITY_GROUP.to_string(),
            person_entity_group: DEFAULT_PERSON_ENTITY_GROUP.to_string(),
            max_documents: DEFAULT_MAX_DOCUMENTS,
        }
    }
}

impl Config {
    const ENV_EMBEDDER_PATH: &'static str = "SHORTLIST_EMBEDDER_PATH";
    const ENV_TAGGER_PATH: &'static str = "SHORTLIST_TAGGER_PATH";
    const ENV_SUMMARIZER_PATH: &'static str = "SHORTLIST_SUMMARIZER_PATH";
    const ENV_GENERATOR_PATH: &'static str = "SHORTLIST_GENERATOR_PATH";
    const ENV_STORAGE_PATH: &'static str = "SHORTLIST_STORAGE_PATH";
    const ENV_EXPORT_PATH: &'static str = "SHORTLIST_EXPORT_PATH";
    const ENV_SELECTION_THRESHOLD: &'static str = "SHORTLIST_SELECTION_THRESHOLD";
    const ENV_SKILL_ENTITY_GROUP: &'static str = "SHORTLIST_SKILL_ENTITY_GROUP";
    const ENV_PERSON_ENTITY_GROUP: &'static str = "SHORTLIST_PERSON_ENTITY_GROUP";
    const ENV_MAX_DOCUMENTS: &'static str = "SHORTLIST_MAX_DOCUMENTS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let tagger_path = Self::parse_optional_path_from_env(Self::ENV_TAGGER_PATH);
        let summarizer_path = Self::parse_optional_path_from_env(Self::ENV_SUMMARIZER_PATH);
        let generator_path = Self::parse_optional_path_from_env(Self::ENV_GENERATOR_PATH)
            .or_else(|| summarizer_path.clone());
        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let export_path = Self::parse_path_from_env(Self::ENV_EXPORT_PATH, defaults.export_path);
        let selection_threshold = Self::parse_threshold_from_env(defaults.selection_threshold)?;
        let skill_entity_group = Self::parse_group_from_env(
            Self::ENV_SKILL_ENTITY_GROUP,
            "skills",
            defaults.skill_entity_group,
        )?;
        let person_entity_group = Self::parse_group_from_env(
            Self::ENV_PERSON_ENTITY_GROUP,
            "names",
            defaults.person_entity_group,
        )?;
        let max_documents = Self::parse_max_documents_from_env(defaults.max_documents)?;

        Ok(Self {
            embedder_path,
            tagger_path,
            summarizer_path,
            generator_path,
            storage_path,
            export_path,
            selection_threshold,
            skill_entity_group,
            person_entity_group,
            max_documents,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        if self.export_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.export_path.clone(),
            });
        }

        for path in [
            &self.embedder_path,
            &self.tagger_path,
            &self.summarizer_path,
            &self.generator_path,
        ]
        .into_iter()
        .flatten()
        {
            Self::validate_model_dir(path)?;
        }

        if !self.selection_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                value: self.selection_threshold.to_string(),
            });
        }

        if self.max_documents == 0 {
            return Err(ConfigError::InvalidMaxDocuments {
                value: self.max_documents.to_string(),
            });
        }

        Ok(())
    }

    fn validate_model_dir(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_SELECTION_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if !threshold.is_finite() {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_max_documents_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_DOCUMENTS) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(ConfigError::InvalidMaxDocuments { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_group_from_env(
        var_name: &str,
        label: &'static str,
        default: String,
    ) -> Result<String, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let value = value.trim().to_string();
                if value.is_empty() {
                    return Err(ConfigError::EmptyEntityGroup { name: label });
                }
                Ok(value)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
