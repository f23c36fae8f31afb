//! Query-time similarity search.

use std::time::Instant;

use tracing::debug;

use crate::{corpus::Corpus, embed::TextEncoder, errors::StoreError, record::RankedResult};

/// Encodes `query` once and returns the `limit` most similar records.
///
/// An empty corpus or `limit == 0` returns an empty list without calling
/// the encoder.
///
/// # Errors
/// The encoder's error, or [`StoreError::VectorSizeMismatch`] if the query
/// vector does not match the corpus.
pub async fn search<'c>(
    query: &str,
    encoder: &dyn TextEncoder,
    corpus: &'c Corpus,
    limit: usize,
) -> Result<Vec<RankedResult<'c>>, StoreError> {
    if corpus.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let t0 = Instant::now();
    let qv = encoder.encode(query).await?;
    let hits = corpus.rank(&qv, limit)?;

    debug!(
        limit,
        hits = hits.len(),
        index = corpus.index_name(),
        latency_ms = t0.elapsed().as_millis() as u64,
        "question search done"
    );
    Ok(hits)
}
