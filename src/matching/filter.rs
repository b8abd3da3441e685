//! Threshold filtering
//!
//! Order-preserving removal of weak candidates. No error conditions: an
//! empty pool is a valid, non-exceptional outcome.

use crate::model::ScoredCandidate;

/// Keep only candidates whose aggregate score meets `threshold`.
/// Survivors keep their relative order.
pub fn filter_by_threshold(scored: Vec<ScoredCandidate>, threshold: u8) -> Vec<ScoredCandidate> {
    scored.into_iter().filter(|s| s.score >= threshold).collect()
}
