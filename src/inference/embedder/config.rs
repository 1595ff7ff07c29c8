use std::path::PathBuf;

use crate::constants::{BERT_MAX_SEQ_LEN, DEFAULT_EMBEDDING_DIM};

/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` runs the embedder in stub mode.
    pub model_path: Option<PathBuf>,
    /// Max tokens considered per text.
    pub max_seq_len: usize,
    /// Output width in stub mode (a loaded model reports its own hidden size).
    pub embedding_dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: BERT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.embedding_dim == 0 {
            return Err("embedding_dim must be greater than zero".to_string());
        }

        if self.max_seq_len == 0 || self.max_seq_len > BERT_MAX_SEQ_LEN {
            return Err(format!(
                "max_seq_len must be between 1 and {}, got {}",
                BERT_MAX_SEQ_LEN, self.max_seq_len
            ));
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
