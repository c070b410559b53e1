//! Ranking of scored feature records
//!
//! Order: `rice_score` descending, then `id` ascending so that equal scores
//! keep creation order and output is reproducible.

use crate::record::FeatureRecord;
use std::cmp::Ordering;

/// Ranked-order comparator
#[inline]
#[must_use]
pub fn compare(a: &FeatureRecord, b: &FeatureRecord) -> Ordering {
    b.rice_score()
        .total_cmp(&a.rice_score())
        .then_with(|| a.id().cmp(&b.id()))
}

/// Sort records into ranked order in place
pub fn rank(records: &mut [FeatureRecord]) {
    records.sort_by(compare);
}

/// Check whether records are already in ranked order
#[must_use]
pub fn is_ranked(records: &[FeatureRecord]) -> bool {
    records
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}
