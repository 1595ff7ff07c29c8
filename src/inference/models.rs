use std::sync::Arc;

use tracing::info;

use crate::config::Config;

use super::embedder::{EmbedderConfig, SentenceEmbedder, TextEmbedder};
use super::error::InferenceError;
use super::generator::{GeneratorConfig, Seq2SeqGenerator, TextGenerator};
use super::tagger::{EntityTagger, TaggerConfig, TokenTagger};

/// Process-wide model handles, loaded once and shared read-only across a batch.
#[derive(Clone)]
pub struct ModelSet {
    pub embedder: Arc<dyn TextEmbedder>,
    pub tagger: Arc<dyn EntityTagger>,
    pub summarizer: Arc<dyn TextGenerator>,
    pub generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("embedding_dim", &self.embedder.embedding_dim())
            .field("summarizer_stub", &self.summarizer.is_stub())
            .field("generator_stub", &self.generator.is_stub())
            .finish()
    }
}

impl ModelSet {
    /// Loads every model named in `config`; unset paths load stub backends.
    ///
    /// When summarizer and generator point at the same directory the weights are loaded once.
    pub fn load(config: &Config) -> Result<Self, InferenceError> {
        let embedder = SentenceEmbedder::load(match &config.embedder_path {
            Some(path) => EmbedderConfig::new(path.clone()),
            None => EmbedderConfig::stub(),
        })?;

        let tagger = TokenTagger::load(match &config.tagger_path {
            Some(path) => TaggerConfig::new(path.clone()),
            None => TaggerConfig::stub(),
        })?;

        let summarizer: Arc<dyn TextGenerator> =
            Arc::new(Seq2SeqGenerator::load(generator_config(&config.summarizer_path))?);

        let generator: Arc<dyn TextGenerator> = if config.generator_path == config.summarizer_path
        {
            Arc::clone(&summarizer)
        } else {
            Arc::new(Seq2SeqGenerator::load(generator_config(&config.generator_path))?)
        };

        info!(
            embedder = ?embedder,
            tagger = ?tagger,
            shared_generator = config.generator_path == config.summarizer_path,
            "Model set ready"
        );

        Ok(Self {
            embedder: Arc::new(embedder),
            tagger: Arc::new(tagger),
            summarizer,
            generator,
        })
    }

    /// All-stub model set (no model files needed).
    pub fn stub() -> Result<Self, InferenceError> {
        Self::load(&Config::default())
    }
}

fn generator_config(path: &Option<std::path::PathBuf>) -> GeneratorConfig {
    match path {
        Some(path) => GeneratorConfig::new(path.clone()),
        None => GeneratorConfig::stub(),
    }
}
