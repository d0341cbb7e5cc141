//! Rank-and-truncate helpers.

use std::cmp::Ordering;

/// Keep the `k` best items according to `cmp` (best first), sorted.
///
/// When more than `k` candidates exist, the `k` best are partitioned out
/// before sorting, so only `k` items are fully ordered.
pub(crate) fn top_k<T, F>(mut items: Vec<T>, k: usize, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if k == 0 {
        return Vec::new();
    }
    if items.len() > k {
        items.select_nth_unstable_by(k - 1, &mut cmp);
        items.truncate(k);
    }
    items.sort_by(cmp);
    items
}

/// Descending by score, ascending by id.
pub(crate) fn by_score_then_id(a_score: f64, a_id: &str, b_score: f64, b_id: &str) -> Ordering {
    b_score.total_cmp(&a_score).then_with(|| a_id.cmp(b_id))
}
