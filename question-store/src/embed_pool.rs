//! Load-time embedding with bounded concurrency and dimension checks.

use futures::{
    TryStreamExt,
    stream::{self, StreamExt},
};
use tracing::{debug, info};

use crate::{
    embed::TextEncoder, errors::StoreError, progress::Progress, record::PendingQuestion,
};

/// Encodes `text` for every row without a vector.
///
/// # Arguments
/// - `rows`: parsed rows; filled in place.
/// - `encoder`: embedding backend.
/// - `expected_dim`: if `Some`, every new vector must have this size.
/// - `concurrency`: maximum number of in-flight encoder calls.
///
/// # Errors
/// [`StoreError::VectorSizeMismatch`] on a wrong size, or the encoder's error.
pub async fn embed_missing(
    rows: &mut [PendingQuestion],
    encoder: &dyn TextEncoder,
    expected_dim: Option<usize>,
    concurrency: usize,
    progress: &dyn Progress,
) -> Result<usize, StoreError> {
    let idxs: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.embedding.is_none().then_some(i))
        .collect();

    if idxs.is_empty() {
        debug!("embed_missing: nothing to embed");
        return Ok(0);
    }

    info!(
        missing = idxs.len(),
        total = rows.len(),
        concurrency,
        "embed_missing: encoding rows without vectors"
    );

    let results: Result<Vec<(usize, Vec<f32>)>, StoreError> = stream::iter(idxs)
        .map(|i| {
            let text = rows[i].text.clone();
            async move {
                let v = encoder.encode(&text).await?;
                Ok::<(usize, Vec<f32>), StoreError>((i, v))
            }
        })
        .buffer_unordered(concurrency.max(1))
        .inspect(|_| progress.step())
        .try_collect()
        .await;

    // The first failure drops every call still in flight.
    let results = match results {
        Ok(r) => r,
        Err(e) => {
            progress.finish("embedding failed");
            return Err(e);
        }
    };

    let filled = results.len();
    for (i, v) in results {
        if let Some(want) = expected_dim {
            if v.len() != want {
                return Err(StoreError::VectorSizeMismatch { got: v.len(), want });
            }
        }
        rows[i].embedding = Some(v);
    }

    progress.finish("questions embedded");
    debug!(filled, "embed_missing: embeddings filled");
    Ok(filled)
}
