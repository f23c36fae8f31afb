//! Immutable, shared question corpus.

use crate::{
    errors::StoreError,
    index::{LinearScanIndex, NearestNeighborIndex},
    record::{QuestionRecord, RankedResult},
};

/// Ordered question records plus the index that ranks them.
///
/// Built once at startup and only read afterwards; share it behind an `Arc`.
pub struct Corpus {
    records: Vec<QuestionRecord>,
    dim: usize,
    index: Box<dyn NearestNeighborIndex>,
}

impl Corpus {
    /// Builds a corpus ranked by [`LinearScanIndex`].
    ///
    /// # Errors
    /// [`StoreError::VectorSizeMismatch`] if any record's vector differs in size
    /// from the first one, or [`StoreError::Config`] if a vector is empty.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, StoreError> {
        let index = LinearScanIndex::build(&records);
        Self::with_index(records, Box::new(index))
    }

    /// Builds a corpus ranked by a caller-supplied index.
    pub fn with_index(
        records: Vec<QuestionRecord>,
        index: Box<dyn NearestNeighborIndex>,
    ) -> Result<Self, StoreError> {
        let dim = records.first().map(|r| r.embedding.len()).unwrap_or(0);
        if !records.is_empty() && dim == 0 {
            return Err(StoreError::Config("embedding vectors must not be empty".into()));
        }
        if let Some(bad) = records.iter().find(|r| r.embedding.len() != dim) {
            return Err(StoreError::VectorSizeMismatch {
                got: bad.embedding.len(),
                want: dim,
            });
        }
        Ok(Self { records, dim, index })
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            dim: 0,
            index: Box::new(LinearScanIndex::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector size shared by all records; 0 for an empty corpus.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    /// Ranks the corpus against an already-encoded query.
    ///
    /// Returns `min(limit, len)` results, best first.
    ///
    /// # Errors
    /// [`StoreError::VectorSizeMismatch`] if `query` has the wrong size.
    pub fn rank(&self, query: &[f32], limit: usize) -> Result<Vec<RankedResult<'_>>, StoreError> {
        if self.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dim {
            return Err(StoreError::VectorSizeMismatch {
                got: query.len(),
                want: self.dim,
            });
        }
        Ok(self
            .index
            .nearest(&self.records, query, limit)
            .into_iter()
            .filter_map(|n| {
                self.records.get(n.position).map(|record| RankedResult {
                    record,
                    score: n.score,
                    position: n.position,
                })
            })
            .collect())
    }
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus")
            .field("len", &self.records.len())
            .field("dim", &self.dim)
            .field("index", &self.index.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(text: &str, v: Vec<f32>) -> QuestionRecord {
        QuestionRecord {
            text: text.into(),
            options: Vec::new(),
            source: None,
            embedding: v,
        }
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let err = Corpus::new(vec![rec("a", vec![1.0, 0.0]), rec("b", vec![1.0])]).unwrap_err();
        assert!(matches!(err, StoreError::VectorSizeMismatch { got: 1, want: 2 }));
    }

    #[test]
    fn rank_checks_query_size() {
        let c = Corpus::new(vec![rec("a", vec![1.0, 0.0])]).unwrap();
        assert!(matches!(
            c.rank(&[1.0, 0.0, 0.0], 1),
            Err(StoreError::VectorSizeMismatch { got: 3, want: 2 })
        ));
    }

    #[test]
    fn limit_above_len_returns_whole_corpus() {
        let c = Corpus::new(vec![rec("a", vec![1.0, 0.0]), rec("b", vec![0.0, 1.0])]).unwrap();
        let got = c.rank(&[0.0, 1.0], 50).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].record.text, "b");
        assert_eq!(got[0].position, 1);
    }

    #[test]
    fn empty_corpus_ranks_nothing() {
        let c = Corpus::empty();
        assert!(c.is_empty());
        assert!(c.rank(&[1.0], 5).unwrap().is_empty());
    }
}
