//! Job-description ↔ candidate similarity.
//!
//! Both texts go through the same [`TextEmbedder`](crate::inference::TextEmbedder); the score is
//! cosine similarity × 100. There is no min-max rescale, so an opposed pair scores below zero
//! and is always Rejected.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::SimilarityScorer;
pub use types::MatchScore;

/// Cosine similarity of two equal-length vectors; 0.0 for empty, mismatched or zero vectors.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}
