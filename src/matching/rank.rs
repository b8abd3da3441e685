//! Deterministic ranking
//!
//! Orders filtered candidates into a total order and bounds the result to
//! the caller's limit. A plain score sort would leave equal-score candidates
//! in input-dependent order, so ties break by most-recent activity and then
//! by reader id: repeated calls on identical input always produce an
//! identical sequence.

use std::cmp::Ordering;

use crate::model::ScoredCandidate;

/// Order candidates by score descending, breaking ties by `last_active`
/// descending and then reader id ascending, then truncate to `limit`.
/// `limit == 0` yields an empty sequence.
pub fn rank(mut scored: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    if limit == 0 {
        return Vec::new();
    }

    scored.sort_by(compare);
    scored.truncate(limit);
    scored
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.candidate.reader.last_active.cmp(&a.candidate.reader.last_active))
        .then_with(|| a.candidate.reader.id.cmp(&b.candidate.reader.id))
}
