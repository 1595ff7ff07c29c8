use thiserror::Error;

use crate::inference::InferenceError;

/// A field strategy could not run. The field falls back to the next strategy or the sentinel.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("entity tagging failed: {source}")]
    Tagging {
        #[source]
        source: InferenceError,
    },

    #[error("text generation failed: {source}")]
    Generation {
        #[source]
        source: InferenceError,
    },
}
