//! Sentence embeddings (BERT mean pooling, e.g. all-MiniLM-L6-v2).
//!
//! Use [`EmbedderConfig::stub`] for tests and model-less runs: the stub hashes
//! words into a fixed-width vector, so texts sharing vocabulary still score
//! closer than unrelated ones.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::EmbedderConfig;

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::hashing::hash_to_u64;
use crate::inference::bert::BertEncoder;
use crate::inference::device::select_device;
use crate::inference::error::InferenceError;
use crate::inference::utils::{load_tokenizer_with_truncation, require_model_files};

/// Text → fixed-width vector. Both sides of a comparison must use the same instance.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError>;

    fn embedding_dim(&self) -> usize;
}

enum EmbedderBackend {
    Model {
        model: BertEncoder,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    embedding_dim: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    pub fn load(config: EmbedderConfig) -> Result<Self, InferenceError> {
        config
            .validate()
            .map_err(|reason| InferenceError::InvalidConfig { reason })?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Embedder running in STUB mode (hashed bag-of-words)");
            let embedding_dim = config.embedding_dim;
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
                embedding_dim,
            });
        };

        require_model_files(&model_path)?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for embedder");

        let model =
            BertEncoder::load(&model_path, &device).map_err(|e| InferenceError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_seq_len).map_err(
            |e| InferenceError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        let embedding_dim = model.hidden_size();

        info!(
            model_path = %model_path.display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            embedding_dim,
        })
    }

    pub fn stub() -> Result<Self, InferenceError> {
        Self::load(EmbedderConfig::stub())
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, InferenceError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| InferenceError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq, hidden]
        let hidden = model
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| InferenceError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        // Mean over non-padding tokens.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?.squeeze(0)?;

        let embedding = pooled.to_vec1::<f32>()?;
        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.embedding_dim];

        for word in text
            .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .filter(|w| !w.is_empty())
        {
            let hash = hash_to_u64(word.to_lowercase().as_bytes());
            let bucket = (hash % self.embedding_dim as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        normalize(embedding)
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

/// L2-normalizes in place; zero vectors are returned unchanged.
pub fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
