//! Embedding abstraction and load-time policies.

use futures::future::BoxFuture;

use crate::errors::StoreError;

pub mod llm_encoder;

/// Text-to-vector provider used for both corpus loading and queries.
///
/// Implementations must be deterministic for a given model so that query
/// and corpus vectors live in the same space.
pub trait TextEncoder: Send + Sync {
    fn encode<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>>;
}

/// How records obtain their vectors while the corpus is loaded.
#[derive(Clone, Copy)]
pub enum EmbeddingPolicy<'a> {
    /// Stored vectors only; a row without one fails the load.
    PrecomputedOnly,
    /// Use stored vectors and encode the rows that lack one.
    PrecomputedOr(&'a dyn TextEncoder),
    /// Ignore stored vectors and encode every row.
    ProviderOnly(&'a dyn TextEncoder),
}

impl<'a> EmbeddingPolicy<'a> {
    pub fn encoder(&self) -> Option<&'a dyn TextEncoder> {
        match *self {
            EmbeddingPolicy::PrecomputedOnly => None,
            EmbeddingPolicy::PrecomputedOr(e) | EmbeddingPolicy::ProviderOnly(e) => Some(e),
        }
    }
}
