use std::io;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use super::error::InferenceError;

/// Files every safetensors model directory must provide.
pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Loads a tokenizer from a model directory or explicit tokenizer.json path.
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new(TOKENIZER_FILE))
    {
        model_path.to_path_buf()
    } else if model_path.is_dir() {
        model_path.join(TOKENIZER_FILE)
    } else {
        model_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Model path has no parent"))?
            .join(TOKENIZER_FILE)
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer with truncation enabled for a maximum sequence length.
///
/// Inputs exceeding `max_len` tokens are cut to fit the model's positional limit.
pub fn load_tokenizer_with_truncation(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    use tokenizers::TruncationParams;

    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok(tokenizer)
}

/// Checks that `model_dir` holds `config.json`, `model.safetensors` and `tokenizer.json`.
///
/// Returns the `(config, weights)` paths on success.
pub fn require_model_files(model_dir: &Path) -> Result<(PathBuf, PathBuf), InferenceError> {
    if !model_dir.exists() {
        return Err(InferenceError::ModelNotFound {
            path: model_dir.to_path_buf(),
        });
    }

    let config_path = model_dir.join(MODEL_CONFIG_FILE);
    let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);
    let tokenizer_path = model_dir.join(TOKENIZER_FILE);

    for path in [&config_path, &weights_path, &tokenizer_path] {
        if !path.exists() {
            return Err(InferenceError::ModelLoadFailed {
                reason: format!(
                    "Missing {} in {}",
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    model_dir.display()
                ),
            });
        }
    }

    Ok((config_path, weights_path))
}
