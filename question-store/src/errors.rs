//! Unified error type for the question store.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for loading and searching the question bank.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus line is not a valid question row.
    #[error("parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// A record reached the corpus without a usable embedding.
    #[error("record on line {line} has no embedding and no encoder was supplied")]
    MissingEmbedding { line: usize },

    /// The embedding backend failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),
}
