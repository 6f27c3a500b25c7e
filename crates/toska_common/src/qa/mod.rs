//! Extractive question answering
//!
//! Answers a question by selecting a contiguous span from a fixed context
//! paragraph. A pretrained transformer QA model scores every token as a
//! potential span start and end; the answer is the valid span with the
//! highest joint probability.
//!
//! The model and tokenizer are loaded once from a checkpoint directory at
//! daemon start and shared read-only across requests.

mod checkpoint;
mod engine;
mod model;
mod span;
mod tokenizer;

pub use checkpoint::CheckpointStore;
pub use engine::{QaAnswer, QaEngine};
pub use model::{QaModel, QaModelConfig};
pub use span::best_span;
pub use tokenizer::load_tokenizer;

/// QA errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum QaError {
    #[error("QA model is not loaded")]
    ModelUnavailable,

    #[error("Tokenization failed: {0}")]
    Tokenize(String),

    #[error("Failed to decode answer span: {0}")]
    Decode(String),

    #[error("Model produced an empty answer span")]
    EmptyAnswer,
}
