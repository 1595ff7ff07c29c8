//! Abstractive CV summaries.
//!
//! The summary is both a stored field and the text scored against the job description.


use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::summary::{
    EMPTY_MESSAGE, ERROR_MESSAGE, MAX_INPUT_CHARS, MAX_SUMMARY_TOKENS, MIN_INPUT_CHARS,
    MIN_SUMMARY_TOKENS, TASK_PREFIX, TOO_SHORT_MESSAGE,
};
use crate::inference::{GenerationParams, TextGenerator};

pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("stub", &self.generator.is_stub())
            .finish()
    }
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Output bounds for a text of `char_len` characters, measured before truncation.
    pub fn params_for(char_len: usize) -> GenerationParams {
        GenerationParams::new((char_len / 2).min(MAX_SUMMARY_TOKENS), MIN_SUMMARY_TOKENS)
    }

    /// Never fails; model errors come back as a fixed message.
    pub fn summarize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let char_len = text.chars().count();
        if char_len < MIN_INPUT_CHARS {
            return TOO_SHORT_MESSAGE.to_string();
        }

        let params = Self::params_for(char_len);
        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
        debug!(
            char_len,
            max_new_tokens = params.max_new_tokens,
            min_new_tokens = params.min_new_tokens,
            "Summarizing"
        );

        match self
            .generator
            .generate(&format!("{TASK_PREFIX}{truncated}"), params)
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Summarization failed");
                ERROR_MESSAGE.to_string()
            }
        }
    }
}
