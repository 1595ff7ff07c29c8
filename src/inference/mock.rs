//! Scriptable model doubles for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::embedder::TextEmbedder;
use super::error::InferenceError;
use super::generator::{GenerationParams, TextGenerator};
use super::tagger::{Entity, EntityTagger};

/// Returns preset vectors per exact text, a default vector otherwise.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
    failing: bool,
}

impl MockEmbedder {
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            default,
            ..Default::default()
        }
    }

    /// An embedder whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            default: vec![0.0],
            ..Default::default()
        }
    }

    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }
}

impl TextEmbedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        if self.failing {
            return Err(InferenceError::InferenceFailed {
                reason: "mock embedder failure".to_string(),
            });
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }

    fn embedding_dim(&self) -> usize {
        self.default.len()
    }
}

/// Returns a fixed entity list for every text.
#[derive(Debug, Default)]
pub struct MockTagger {
    entities: Vec<Entity>,
    failing: bool,
    calls: AtomicUsize,
}

impl MockTagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, group: &str, word: &str) -> Self {
        self.entities.push(Entity {
            group: group.to_string(),
            word: word.to_string(),
            score: 0.99,
            start: 0,
            end: word.len(),
        });
        self
    }

    /// Number of `tag` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl EntityTagger for MockTagger {
    fn tag(&self, _text: &str) -> Result<Vec<Entity>, InferenceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing {
            return Err(InferenceError::InferenceFailed {
                reason: "mock tagger failure".to_string(),
            });
        }
        Ok(self.entities.clone())
    }
}

/// Returns a fixed response and records every prompt it receives.
#[derive(Debug, Default)]
pub struct MockGenerator {
    response: String,
    failing: bool,
    stub: bool,
    prompts: Mutex<Vec<(String, GenerationParams)>>,
}

impl MockGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Marks the generator as a stub so generative strategies skip it.
    pub fn as_stub(mut self) -> Self {
        self.stub = true;
        self
    }

    pub fn prompts(&self) -> Vec<(String, GenerationParams)> {
        self.prompts.lock().clone()
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, InferenceError> {
        self.prompts.lock().push((prompt.to_string(), params));
        if self.failing {
            return Err(InferenceError::InferenceFailed {
                reason: "mock generator failure".to_string(),
            });
        }
        Ok(self.response.clone())
    }

    fn is_stub(&self) -> bool {
        self.stub
    }
}
