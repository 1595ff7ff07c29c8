//! Named-entity tagging (BERT token classification, e.g. dslim/bert-base-NER).
//!
//! Long texts are tagged in windows of [`TaggerConfig::max_seq_len`] tokens;
//! entity offsets always refer to the original text.

pub mod aggregate;
pub mod config;


pub use aggregate::TokenPrediction;
pub use config::TaggerConfig;

use std::sync::Arc;

use candle_core::{D, Device, Tensor};
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::inference::bert::BertTokenClassifier;
use crate::inference::device::select_device;
use crate::inference::error::InferenceError;
use crate::inference::utils::{load_tokenizer, require_model_files};

/// One aggregated entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity group without the BIO prefix (`PER`, `ORG`, `LOC`, `MISC`).
    pub group: String,
    pub word: String,
    /// Mean token probability.
    pub score: f32,
    /// Byte offsets into the tagged text.
    pub start: usize,
    pub end: usize,
}

/// Text → entity spans in document order.
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, InferenceError>;
}

enum TaggerBackend {
    Model {
        model: BertTokenClassifier,
        tokenizer: Arc<Tokenizer>,
        device: Device,
        cls_id: u32,
        sep_id: u32,
    },
    Stub,
}

pub struct TokenTagger {
    backend: TaggerBackend,
    config: TaggerConfig,
}

impl std::fmt::Debug for TokenTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenTagger")
            .field(
                "backend",
                &match &self.backend {
                    TaggerBackend::Model { device, model, .. } => {
                        format!("Model({:?}, {} labels)", device, model.labels().len())
                    }
                    TaggerBackend::Stub => "Stub".to_string(),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl TokenTagger {
    pub fn load(config: TaggerConfig) -> Result<Self, InferenceError> {
        config
            .validate()
            .map_err(|reason| InferenceError::InvalidConfig { reason })?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Entity tagger running in STUB mode (leading-line name heuristic)");
            return Ok(Self {
                backend: TaggerBackend::Stub,
                config,
            });
        };

        require_model_files(&model_path)?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for entity tagger");

        let model = BertTokenClassifier::load(&model_path, &device).map_err(|e| {
            InferenceError::ModelLoadFailed {
                reason: format!("Failed to load token classifier: {}", e),
            }
        })?;

        let tokenizer =
            load_tokenizer(&model_path).map_err(|e| InferenceError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        let special = |token: &str| {
            tokenizer
                .token_to_id(token)
                .ok_or_else(|| InferenceError::InvalidConfig {
                    reason: format!("tokenizer has no {token} token"),
                })
        };
        let cls_id = special("[CLS]")?;
        let sep_id = special("[SEP]")?;

        info!(
            model_path = %model_path.display(),
            labels = ?model.labels(),
            "Entity tagger loaded"
        );

        Ok(Self {
            backend: TaggerBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
                cls_id,
                sep_id,
            },
            config,
        })
    }

    pub fn stub() -> Result<Self, InferenceError> {
        Self::load(TaggerConfig::stub())
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, TaggerBackend::Stub)
    }

    fn predict_window(
        &self,
        model: &BertTokenClassifier,
        device: &Device,
        ids: &[u32],
    ) -> Result<Vec<(usize, f32)>, InferenceError> {
        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        let logits = model
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| InferenceError::InferenceFailed {
                reason: format!("token classification failed: {}", e),
            })?;

        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec2::<f32>()?;

        Ok(probs
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .fold((0usize, f32::MIN), |best, (idx, p)| {
                        if p > best.1 { (idx, p) } else { best }
                    })
            })
            .collect())
    }

    fn tag_with_model(
        &self,
        text: &str,
        model: &BertTokenClassifier,
        tokenizer: &Tokenizer,
        device: &Device,
        cls_id: u32,
        sep_id: u32,
    ) -> Result<Vec<Entity>, InferenceError> {
        let encoding =
            tokenizer
                .encode(text, false)
                .map_err(|e| InferenceError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        let offsets = encoding.get_offsets();
        let word_ids = encoding.get_word_ids();
        let window = self.config.max_seq_len - 2;

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            windows = ids.len().div_ceil(window),
            "Tagging entities"
        );

        let mut predictions = Vec::with_capacity(ids.len());
        for (chunk_idx, chunk) in ids.chunks(window).enumerate() {
            let mut window_ids = Vec::with_capacity(chunk.len() + 2);
            window_ids.push(cls_id);
            window_ids.extend_from_slice(chunk);
            window_ids.push(sep_id);

            let scored = self.predict_window(model, device, &window_ids)?;
            let base = chunk_idx * window;

            // Skip the [CLS]/[SEP] rows.
            for (i, (label_idx, score)) in scored
                .into_iter()
                .skip(1)
                .take(chunk.len())
                .enumerate()
            {
                let (start, end) = offsets[base + i];
                predictions.push(TokenPrediction {
                    label: model
                        .labels()
                        .get(label_idx)
                        .cloned()
                        .unwrap_or_else(|| "O".to_string()),
                    score,
                    start,
                    end,
                    word_id: word_ids[base + i],
                });
            }
        }

        Ok(aggregate::aggregate(text, &predictions))
    }

    /// First non-empty line made of 2–4 capitalized words is taken as a person name.
    fn tag_stub(&self, text: &str) -> Vec<Entity> {
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                offset += line.len();
                continue;
            }

            let words: Vec<&str> = trimmed.split_whitespace().collect();
            let looks_like_name = (2..=4).contains(&words.len())
                && words.iter().all(|w| {
                    let mut chars = w.chars();
                    chars.next().is_some_and(|c| c.is_uppercase())
                        && chars.all(|c| c.is_lowercase() || c == '-' || c == '\'')
                });

            if !looks_like_name {
                return vec![];
            }

            let start = offset + (line.len() - line.trim_start().len());
            return vec![Entity {
                group: crate::constants::DEFAULT_PERSON_ENTITY_GROUP.to_string(),
                word: trimmed.to_string(),
                score: 1.0,
                start,
                end: start + trimmed.len(),
            }];
        }
        vec![]
    }
}

impl EntityTagger for TokenTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, InferenceError> {
        match &self.backend {
            TaggerBackend::Model {
                model,
                tokenizer,
                device,
                cls_id,
                sep_id,
            } => self.tag_with_model(text, model, tokenizer, device, *cls_id, *sep_id),
            TaggerBackend::Stub => Ok(self.tag_stub(text)),
        }
    }
}
