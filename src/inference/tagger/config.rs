use std::path::PathBuf;

use crate::constants::BERT_MAX_SEQ_LEN;

/// Configuration for [`TokenTagger`](super::TokenTagger).
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Token-classification model directory. `None` runs the tagger in stub mode.
    pub model_path: Option<PathBuf>,
    /// Window size in tokens, including `[CLS]` and `[SEP]`.
    pub max_seq_len: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: BERT_MAX_SEQ_LEN,
        }
    }
}

impl TaggerConfig {
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
        if self.max_seq_len < 3 || self.max_seq_len > BERT_MAX_SEQ_LEN {
            return Err(format!(
                "max_seq_len must be between 3 and {}, got {}",
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
