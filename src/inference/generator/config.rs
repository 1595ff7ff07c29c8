use std::path::PathBuf;

use crate::constants::GENERATOR_MAX_INPUT_TOKENS;

/// Configuration for [`Seq2SeqGenerator`](super::Seq2SeqGenerator).
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// T5-family model directory. `None` runs the generator in stub mode.
    pub model_path: Option<PathBuf>,
    /// Encoder input limit in tokens; longer prompts are truncated.
    pub max_input_tokens: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_input_tokens: GENERATOR_MAX_INPUT_TOKENS,
        }
    }
}

impl GeneratorConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_tokens == 0 {
            return Err("max_input_tokens must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}

/// Output bounds for one generation call, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    pub min_new_tokens: usize,
}

impl GenerationParams {
    /// Builds bounds with the floor clamped to the cap.
    pub fn new(max_new_tokens: usize, min_new_tokens: usize) -> Self {
        Self {
            max_new_tokens,
            min_new_tokens: min_new_tokens.min(max_new_tokens),
        }
    }
}
