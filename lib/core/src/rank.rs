//! Deterministic ordering of scored candidates.

use std::cmp::Ordering;

use crate::record::ComparableResult;

/// Sort by confidence descending with an ascending-pin tie-break, then
/// truncate to `top_n`.
///
/// The tie-break keeps ranking deterministic when scores are numerically
/// equal, e.g. in the zero-variance degenerate case. Fewer than `top_n`
/// candidates is not an error; all of them are returned.
pub fn rank(mut results: Vec<ComparableResult>, top_n: usize) -> Vec<ComparableResult> {
    results.sort_by(|a, b| {
        b.confidence_score
            .partial_cmp(&a.confidence_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.pin.cmp(&b.pin))
    });
    results.truncate(top_n);
    results
}
