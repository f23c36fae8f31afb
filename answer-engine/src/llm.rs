//! Text generation seam used by the engine.

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;

use crate::error::AnswerError;

/// Prompt-in, text-out model call.
pub trait Generator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AnswerError>>;
}

/// Uses the **generation** profile (Gemini or Ollama).
impl Generator for LlmServiceProfiles {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AnswerError>> {
        Box::pin(async move { Ok(LlmServiceProfiles::generate(self, prompt).await?) })
    }
}
