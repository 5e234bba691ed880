//! Pure merge functions for history records.
//!
//! These functions never mutate their inputs; stores call them to compute a
//! new list and then replace their stored list wholesale.

use std::collections::HashSet;
use crate::domain::sorting::sort_newest_first;
use crate::traits::{HistoryEntry, SimulationId};

/// Drops records whose ID was already seen, keeping the first occurrence.
///
/// `seen` is extended with every ID that passes. Records without an ID
/// always pass.
pub fn retain_unseen<R, I>(records: I, seen: &mut HashSet<SimulationId>) -> Vec<R>
where
    R: HistoryEntry,
    I: IntoIterator<Item = R>,
{
    records
        .into_iter()
        .filter(|record| match record.simulation_id() {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

/// Normalizes a full list: removes duplicate IDs and sorts newest first.
pub fn normalize_records<R, I>(records: I) -> Vec<R>
where
    R: HistoryEntry,
    I: IntoIterator<Item = R>,
{
    let mut seen = HashSet::new();
    let mut out = retain_unseen(records, &mut seen);
    sort_newest_first(&mut out);
    out
}

/// Merges incoming records into an existing list.
///
/// Incoming records whose ID is already present are dropped; the stored
/// record is never overwritten. The combined list is then fully re-sorted.
/// Stored records precede incoming ones before sorting, so records without
/// an ID stay in arrival order.
pub fn merge_records<R, I>(existing: &[R], incoming: I) -> Vec<R>
where
    R: HistoryEntry + Clone,
    I: IntoIterator<Item = R>,
{
    let mut seen: HashSet<SimulationId> = existing
        .iter()
        .filter_map(|record| record.simulation_id())
        .collect();

    let mut combined = existing.to_vec();
    combined.extend(retain_unseen(incoming, &mut seen));
    sort_newest_first(&mut combined);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_drops_existing_ids() {
        let existing: Vec<SimulationId> = vec![5, 3];
        let merged = merge_records(&existing, vec![5, 1]);
        assert_eq!(merged, vec![5, 3, 1]);
    }

    #[test]
    fn test_merge_dedups_within_batch() {
        let merged = merge_records::<SimulationId, _>(&[], vec![4, 4, 2]);
        assert_eq!(merged, vec![4, 2]);
    }

    #[test]
    fn test_merge_keeps_all_missing_ids() {
        let existing: Vec<Option<SimulationId>> = vec![Some(2), None];
        let merged = merge_records(&existing, vec![None, Some(8)]);
        assert_eq!(merged, vec![Some(8), Some(2), None, None]);
    }

    #[test]
    fn test_merge_empty_incoming_sorts() {
        let unsorted: Vec<SimulationId> = vec![1, 9, 4];
        let merged = merge_records(&unsorted, Vec::new());
        assert_eq!(merged, vec![9, 4, 1]);
    }

    #[test]
    fn test_normalize() {
        let ids: Vec<SimulationId> = vec![3, 10, 3, 7];
        assert_eq!(normalize_records(ids), vec![10, 7, 3]);
    }
}
