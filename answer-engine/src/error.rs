//! Typed error for the answer engine.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    /// Loading or searching the question bank failed.
    #[error("{0}")]
    Store(#[from] question_store::StoreError),

    /// Errors from the shared LLM service.
    #[error("{0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Generation did not finish in time.
    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),
}
