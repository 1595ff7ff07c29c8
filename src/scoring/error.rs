use thiserror::Error;

use crate::inference::InferenceError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("failed to embed {which}: {source}")]
    Embedding {
        which: &'static str,
        #[source]
        source: InferenceError,
    },

    #[error("embedding dimension mismatch: job description {job}, candidate {candidate}")]
    DimensionMismatch { job: usize, candidate: usize },
}
