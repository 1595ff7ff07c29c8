use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::SCORE_SCALE;
use crate::inference::TextEmbedder;

use super::cosine_similarity;
use super::error::ScoringError;
use super::types::MatchScore;

pub struct SimilarityScorer {
    embedder: Arc<dyn TextEmbedder>,
    threshold: f32,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("embedding_dim", &self.embedder.embedding_dim())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn TextEmbedder>, threshold: f32) -> Self {
        Self {
            embedder,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Cosine similarity × 100, in [-100, 100].
    pub fn score(&self, job_text: &str, candidate_text: &str) -> Result<f32, ScoringError> {
        let job = self
            .embedder
            .embed(job_text)
            .map_err(|source| ScoringError::Embedding {
                which: "job description",
                source,
            })?;
        let candidate =
            self.embedder
                .embed(candidate_text)
                .map_err(|source| ScoringError::Embedding {
                    which: "candidate text",
                    source,
                })?;

        if job.len() != candidate.len() {
            return Err(ScoringError::DimensionMismatch {
                job: job.len(),
                candidate: candidate.len(),
            });
        }

        let score = cosine_similarity(&job, &candidate) * SCORE_SCALE;
        debug!(score, dim = job.len(), "Similarity scored");
        Ok(score)
    }

    /// [`score`](Self::score) with failures turned into a 0 / Rejected result.
    pub fn match_score(&self, job_text: &str, candidate_text: &str) -> MatchScore {
        match self.score(job_text, candidate_text) {
            Ok(value) => MatchScore::new(value, self.threshold),
            Err(e) => {
                warn!(error = %e, "Scoring failed, defaulting to 0");
                MatchScore::failed(e.to_string())
            }
        }
    }
}
