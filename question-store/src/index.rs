//! Nearest-neighbour ranking over the in-memory corpus.
//!
//! [`LinearScanIndex`] is exact: every record is scored. Another index (ANN)
//! can be plugged into [`crate::corpus::Corpus::with_index`] without touching
//! callers.

use std::cmp::Ordering;

use crate::record::QuestionRecord;

/// One scored position in corpus order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub score: f32,
}

/// Ranks records by similarity to a query vector.
pub trait NearestNeighborIndex: Send + Sync {
    /// Returns at most `k` neighbours, best first. Equal scores keep corpus order.
    fn nearest(&self, records: &[QuestionRecord], query: &[f32], k: usize) -> Vec<Neighbor>;

    fn name(&self) -> &'static str;
}

/// Exact cosine scan with record norms computed once at build time.
#[derive(Debug, Default)]
pub struct LinearScanIndex {
    norms: Vec<f32>,
}

impl LinearScanIndex {
    pub fn build(records: &[QuestionRecord]) -> Self {
        Self {
            norms: records.iter().map(|r| l2_norm(&r.embedding)).collect(),
        }
    }
}

impl NearestNeighborIndex for LinearScanIndex {
    fn nearest(&self, records: &[QuestionRecord], query: &[f32], k: usize) -> Vec<Neighbor> {
        if k == 0 || records.is_empty() {
            return Vec::new();
        }
        let qn = l2_norm(query);

        let mut scored: Vec<Neighbor> = records
            .iter()
            .enumerate()
            .map(|(position, r)| {
                let rn = self
                    .norms
                    .get(position)
                    .copied()
                    .unwrap_or_else(|| l2_norm(&r.embedding));
                Neighbor {
                    position,
                    score: cosine_with_norms(query, qn, &r.embedding, rn),
                }
            })
            .collect();

        // sort_by is stable; NaN sinks below every real score.
        scored.sort_by(|a, b| desc_score(a.score, b.score));
        scored.truncate(k);
        scored
    }

    fn name(&self) -> &'static str {
        "linear-scan"
    }
}

fn desc_score(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity; 0.0 when either vector has zero norm or sizes differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_with_norms(a, l2_norm(a), b, l2_norm(b))
}

fn cosine_with_norms(a: &[f32], an: f32, b: &[f32], bn: f32) -> f32 {
    if a.len() != b.len() || an == 0.0 || bn == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (an * bn)
}
