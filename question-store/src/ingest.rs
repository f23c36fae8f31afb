//! Startup loading pipeline: read JSONL → resolve vectors → build [`Corpus`].

use tracing::{debug, info};

use crate::{
    config::StoreConfig,
    corpus::Corpus,
    embed::EmbeddingPolicy,
    embed_pool::embed_missing,
    errors::StoreError,
    io_jsonl::read_question_rows,
    progress,
    record::{PendingQuestion, QuestionRecord},
};

/// Loads the question bank described by `cfg`.
///
/// All-or-nothing: any unreadable line, wrong-sized vector or failed
/// encoder call fails the load.
///
/// # Errors
/// [`StoreError`] from reading, embedding or corpus validation.
pub async fn load_corpus(cfg: &StoreConfig, policy: EmbeddingPolicy<'_>) -> Result<Corpus, StoreError> {
    cfg.validate()?;
    let rows = read_question_rows(&cfg.path)?;
    let corpus = build_corpus(rows, cfg.expected_dim, cfg.concurrency, policy).await?;
    info!(
        path = ?cfg.path,
        records = corpus.len(),
        dim = corpus.dim(),
        "question bank loaded"
    );
    Ok(corpus)
}

/// Resolves vectors for already-parsed rows and builds the corpus.
pub async fn build_corpus(
    mut rows: Vec<PendingQuestion>,
    expected_dim: Option<usize>,
    concurrency: usize,
    policy: EmbeddingPolicy<'_>,
) -> Result<Corpus, StoreError> {
    if rows.is_empty() {
        debug!("build_corpus: no rows");
        return Ok(Corpus::empty());
    }

    if let EmbeddingPolicy::ProviderOnly(_) = policy {
        for r in &mut rows {
            r.embedding = None;
        }
    }

    let dim = expected_dim.or_else(|| stored_dim(&rows));
    if let Some(want) = dim {
        check_stored(&rows, want)?;
    }

    if let Some(encoder) = policy.encoder() {
        let missing = rows.iter().filter(|r| r.embedding.is_none()).count() as u64;
        let bar = progress::for_terminal(missing);
        embed_missing(&mut rows, encoder, dim, concurrency, bar.as_ref()).await?;
    }

    let records = rows
        .into_iter()
        .map(QuestionRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Corpus::new(records)
}

fn stored_dim(rows: &[PendingQuestion]) -> Option<usize> {
    rows.iter().find_map(|r| r.embedding.as_ref().map(Vec::len))
}

fn check_stored(rows: &[PendingQuestion], want: usize) -> Result<(), StoreError> {
    for v in rows.iter().filter_map(|r| r.embedding.as_ref()) {
        if v.len() != want {
            return Err(StoreError::VectorSizeMismatch { got: v.len(), want });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;

    use super::*;
    use crate::embed::TextEncoder;

    struct Ones(usize);

    impl TextEncoder for Ones {
        fn encode<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
            Box::pin(async move { Ok(vec![1.0; self.0]) })
        }
    }

    fn pending(line: usize, embedding: Option<Vec<f32>>) -> PendingQuestion {
        PendingQuestion {
            line,
            text: format!("Q{line}"),
            options: Vec::new(),
            source: None,
            embedding,
        }
    }

    #[tokio::test]
    async fn precomputed_only_requires_every_vector() {
        let rows = vec![pending(1, Some(vec![1.0, 0.0])), pending(2, None)];
        let err = build_corpus(rows, None, 1, EmbeddingPolicy::PrecomputedOnly)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingEmbedding { line: 2 }));
    }

    #[tokio::test]
    async fn missing_vectors_are_filled_from_encoder() {
        let enc = Ones(2);
        let rows = vec![pending(1, Some(vec![1.0, 0.0])), pending(2, None)];
        let c = build_corpus(rows, None, 2, EmbeddingPolicy::PrecomputedOr(&enc))
            .await
            .unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.records()[1].embedding, vec![1.0, 1.0]);
    }

    #[tokio::test]
    async fn provider_only_replaces_stored_vectors() {
        let enc = Ones(3);
        let rows = vec![pending(1, Some(vec![1.0, 0.0]))];
        let c = build_corpus(rows, Some(3), 1, EmbeddingPolicy::ProviderOnly(&enc))
            .await
            .unwrap();
        assert_eq!(c.dim(), 3);
    }

    #[tokio::test]
    async fn stored_vector_of_wrong_size_fails() {
        let rows = vec![pending(1, Some(vec![1.0, 0.0]))];
        let err = build_corpus(rows, Some(384), 1, EmbeddingPolicy::PrecomputedOnly)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VectorSizeMismatch { got: 2, want: 384 }));
    }

    #[tokio::test]
    async fn no_rows_gives_empty_corpus() {
        let c = build_corpus(Vec::new(), None, 1, EmbeddingPolicy::PrecomputedOnly)
            .await
            .unwrap();
        assert!(c.is_empty());
    }
}
