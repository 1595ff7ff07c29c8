//! Text-to-text generation (T5 conditional generation, e.g. flan-t5-base).
//!
//! Decoding is greedy, so output is deterministic for fixed weights and input.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{GenerationParams, GeneratorConfig};

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::inference::device::select_device;
use crate::inference::error::InferenceError;
use crate::inference::utils::{load_tokenizer_with_truncation, require_model_files};

/// Prompt → generated text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, InferenceError>;

    /// `true` when output is not produced by a real model.
    fn is_stub(&self) -> bool {
        false
    }
}

enum GeneratorBackend {
    Model {
        model: Arc<Mutex<t5::T5ForConditionalGeneration>>,
        model_config: t5::Config,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

pub struct Seq2SeqGenerator {
    backend: GeneratorBackend,
    config: GeneratorConfig,
}

impl std::fmt::Debug for Seq2SeqGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seq2SeqGenerator")
            .field(
                "backend",
                &match &self.backend {
                    GeneratorBackend::Model { device, .. } => format!("Model({:?})", device),
                    GeneratorBackend::Stub => "Stub".to_string(),
                },
            )
            .field("max_input_tokens", &self.config.max_input_tokens)
            .finish()
    }
}

impl Seq2SeqGenerator {
    pub fn load(config: GeneratorConfig) -> Result<Self, InferenceError> {
        config
            .validate()
            .map_err(|reason| InferenceError::InvalidConfig { reason })?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Generator running in STUB mode (extractive lead sentences)");
            return Ok(Self {
                backend: GeneratorBackend::Stub,
                config,
            });
        };

        let (config_path, weights_path) = require_model_files(&model_path)?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for generator");

        let model_config: t5::Config =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        // SAFETY: the weights file is opened read-only and is not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &model_config).map_err(|e| {
            InferenceError::ModelLoadFailed {
                reason: format!("Failed to load T5 model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_input_tokens)
            .map_err(|e| InferenceError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            model_path = %model_path.display(),
            max_input_tokens = config.max_input_tokens,
            "Seq2seq generator loaded"
        );

        Ok(Self {
            backend: GeneratorBackend::Model {
                model: Arc::new(Mutex::new(model)),
                model_config,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    pub fn stub() -> Result<Self, InferenceError> {
        Self::load(GeneratorConfig::stub())
    }

    fn generate_with_model(
        &self,
        prompt: &str,
        params: GenerationParams,
        model: &Mutex<t5::T5ForConditionalGeneration>,
        model_config: &t5::Config,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<String, InferenceError> {
        let encoding =
            tokenizer
                .encode(prompt, true)
                .map_err(|e| InferenceError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            prompt_len = prompt.len(),
            token_count = encoding.get_ids().len(),
            max_new_tokens = params.max_new_tokens,
            "Generating text"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let eos = model_config.eos_token_id as u32;
        let start = model_config
            .decoder_start_token_id
            .unwrap_or(model_config.pad_token_id) as u32;

        let mut model = model.lock();
        model.clear_kv_cache();
        let encoder_output = model.encode(&input_ids)?;

        let mut output: Vec<u32> = vec![start];
        for step in 0..params.max_new_tokens {
            let decoder_ids = if step == 0 || !model_config.use_cache {
                Tensor::new(output.as_slice(), device)?.unsqueeze(0)?
            } else {
                let last = output[output.len() - 1];
                Tensor::new(&[last], device)?.unsqueeze(0)?
            };

            let logits = model
                .decode(&decoder_ids, &encoder_output)?
                .squeeze(0)?
                .to_vec1::<f32>()?;

            let next = greedy_pick(&logits, (step < params.min_new_tokens).then_some(eos))
                .ok_or_else(|| InferenceError::InferenceFailed {
                    reason: "decoder produced empty logits".to_string(),
                })?;

            if next == eos {
                break;
            }
            output.push(next);
        }
        model.clear_kv_cache();

        tokenizer
            .decode(&output[1..], true)
            .map(|text| text.trim().to_string())
            .map_err(|e| InferenceError::TokenizationFailed {
                reason: e.to_string(),
            })
    }

    /// Lead sentences of the prompt body (text after the first `": "`), bounded by word count.
    fn generate_stub(&self, prompt: &str, params: GenerationParams) -> String {
        let body = prompt
            .split_once(": ")
            .map(|(_, rest)| rest)
            .unwrap_or(prompt);

        let mut out = Vec::new();
        for sentence in body.split_inclusive(['.', '!', '?']) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            if !out.is_empty() && out.len() + words.len() > params.max_new_tokens {
                break;
            }
            out.extend(words);
            if out.len() >= params.max_new_tokens {
                out.truncate(params.max_new_tokens);
                break;
            }
        }
        out.join(" ")
    }
}

/// Index of the largest logit, skipping `banned`.
fn greedy_pick(logits: &[f32], banned: Option<u32>) -> Option<u32> {
    logits
        .iter()
        .enumerate()
        .filter(|(idx, _)| banned != Some(*idx as u32))
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx as u32)
}

impl TextGenerator for Seq2SeqGenerator {
    fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, InferenceError> {
        match &self.backend {
            GeneratorBackend::Model {
                model,
                model_config,
                tokenizer,
                device,
            } => self.generate_with_model(prompt, params, model, model_config, tokenizer, device),
            GeneratorBackend::Stub => Ok(self.generate_stub(prompt, params)),
        }
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, GeneratorBackend::Stub)
    }
}
