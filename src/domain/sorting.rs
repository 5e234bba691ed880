//! Sorting helpers for history lists.
//!
//! History is always shown newest first, i.e. descending by simulation ID.
//! Records without an ID sort after every identified record.

use std::cmp::Ordering;
use crate::traits::HistoryEntry;

/// Sorts records in place, newest (highest ID) first.
///
/// The sort is stable, so records without an ID keep their relative
/// arrival order at the end of the list.
pub fn sort_newest_first<R: HistoryEntry>(records: &mut [R]) {
    records.sort_by(compare_newest_first);
}

/// Ordering used by [`sort_newest_first`].
pub fn compare_newest_first<R: HistoryEntry>(a: &R, b: &R) -> Ordering {
    // None < Some(_) for Option, so reversing puts identified records first
    b.simulation_id().cmp(&a.simulation_id())
}

/// Returns true if the records are in newest-first order.
pub fn is_newest_first<R: HistoryEntry>(records: &[R]) -> bool {
    records
        .windows(2)
        .all(|pair| compare_newest_first(&pair[0], &pair[1]) != Ordering::Greater)
}
