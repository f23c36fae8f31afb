//! [`TextEncoder`] backed by the shared LLM service's embedding profile.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;

use crate::{embed::TextEncoder, errors::StoreError};

/// Encoder that calls `LlmServiceProfiles::embed` (Ollama `/api/embeddings`).
#[derive(Clone)]
pub struct LlmEncoder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected vector size; `None` accepts whatever the model returns.
    dim: Option<usize>,
}

impl LlmEncoder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl TextEncoder for LlmEncoder {
    fn encode<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
        Box::pin(async move {
            let v = self.svc.embed(text).await?;
            match self.dim {
                Some(want) if v.len() != want => Err(StoreError::VectorSizeMismatch {
                    got: v.len(),
                    want,
                }),
                _ => Ok(v),
            }
        })
    }
}
