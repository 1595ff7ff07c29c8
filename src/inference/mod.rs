//! Model backends behind narrow traits.
//!
//! - [`embedder`] turns text into vectors for [`crate::scoring`].
//! - [`tagger`] finds entity spans for name and skill extraction.
//! - [`generator`] runs text-to-text generation for summaries and the education fallback.
//!
//! Every backend has a stub mode selected by leaving its model path unset.

/// BERT heads (encoder, token classifier).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
pub mod embedder;
mod error;
pub mod generator;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod models;
pub mod tagger;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use embedder::{EmbedderConfig, SentenceEmbedder, TextEmbedder};
pub use error::InferenceError;
pub use generator::{GenerationParams, GeneratorConfig, Seq2SeqGenerator, TextGenerator};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEmbedder, MockGenerator, MockTagger};
pub use models::ModelSet;
pub use tagger::{Entity, EntityTagger, TaggerConfig, TokenTagger};
