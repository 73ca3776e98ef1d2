//! Top-k ordering of scored documents

use std::cmp::Ordering;

use crate::types::DocumentScore;

pub const DEFAULT_TOP_K: usize = 10;

/// Sort by score descending, ties by ascending document id, keep the first `k`.
pub fn rank(mut scores: Vec<DocumentScore>, k: usize) -> Vec<DocumentScore> {
    scores.sort_by(compare);
    scores.truncate(k);
    scores
}

fn compare(a: &DocumentScore, b: &DocumentScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.document_id.cmp(&b.document_id))
}
