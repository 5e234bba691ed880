//! Simulation history state management.
//!
//! This module owns the list of past simulation runs shown in the history
//! view. The list is assembled from an initial full load plus any number of
//! pages or post-run refreshes, deduplicated by simulation ID and kept in
//! newest-first order after every mutation.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::domain::merge::{merge_records, normalize_records};
use crate::model::HistorySummaryRecord;
use crate::traits::{HistoryEntry, SimulationId};

/// Deduplicated, newest-first list of history records.
///
/// Responsibilities:
/// - Replacing the list on an authoritative full load
/// - Merging later arrivals without duplicating or overwriting records
/// - Re-establishing newest-first order after every mutation
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMerger<R> {
    records: Vec<R>,
}

impl<R> Default for HistoryMerger<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> HistoryMerger<R> {
    /// Creates an empty history list.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the current list.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the number of records in the list.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Empties the list.
    pub fn clear(&mut self) -> &[R] {
        self.records.clear();
        &self.records
    }
}

impl<R: HistoryEntry + Clone> HistoryMerger<R> {
    /// Discards the current list and stores `records` as the new one.
    ///
    /// Records are sorted newest first; if the same ID appears more than
    /// once only the first occurrence is kept.
    pub fn replace_all(&mut self, records: Vec<R>) -> &[R] {
        self.records = normalize_records(records);
        &self.records
    }

    /// Adds records whose IDs are not already present, then re-sorts.
    ///
    /// Records with an ID already in the list are dropped; the stored record
    /// wins. Merging the same batch twice leaves the list unchanged.
    pub fn merge<I>(&mut self, incoming: I) -> &[R]
    where
        I: IntoIterator<Item = R>,
    {
        self.records = merge_records(&self.records, incoming);
        &self.records
    }

    /// Returns true if a record with `id` is in the list.
    pub fn contains(&self, id: SimulationId) -> bool {
        self.records.iter().any(|r| r.simulation_id() == Some(id))
    }

    /// Returns the record with `id`, if present.
    pub fn get(&self, id: SimulationId) -> Option<&R> {
        self.records.iter().find(|r| r.simulation_id() == Some(id))
    }
}

/// One page of history as returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, alias = "data")]
    pub records: Vec<HistorySummaryRecord>,
}

/// Where the next history fetch should continue from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Next page to request
    pub next_page: u32,
    /// Whether the backend reported more pages
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            next_page: 1,
            has_more: true,
        }
    }
}

/// History store: merged records plus paging and fetch tracking.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    merger: HistoryMerger<HistorySummaryRecord>,
    cursor: PageCursor,
    /// True while a history fetch is in flight
    in_flight: bool,
}

impl HistoryState {
    /// Creates an empty history store.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    /// Returns the merged, newest-first history.
    pub fn records(&self) -> &[HistorySummaryRecord] {
        self.merger.records()
    }

    /// Returns the underlying merger.
    pub fn merger(&self) -> &HistoryMerger<HistorySummaryRecord> {
        &self.merger
    }

    /// Returns the paging cursor.
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Returns true if a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    // ===== Mutations =====

    /// Marks a history fetch as started.
    pub fn begin_fetch(&mut self) {
        self.in_flight = true;
    }

    /// Marks the in-flight fetch as failed. Records are left untouched.
    pub fn fetch_failed(&mut self) {
        self.in_flight = false;
    }

    /// Replaces the history with an authoritative full load.
    pub fn load_initial(&mut self, records: Vec<HistorySummaryRecord>) -> &[HistorySummaryRecord] {
        self.in_flight = false;
        self.cursor = PageCursor::default();
        let records = self.merger.replace_all(records);
        debug!("History replaced with {} records", records.len());
        records
    }

    /// Merges a page of history.
    ///
    /// Pages may arrive out of order; the cursor only ever moves forward and
    /// `has_more` follows the highest page seen.
    pub fn apply_page(&mut self, page: HistoryPage) -> &[HistorySummaryRecord] {
        self.in_flight = false;

        if page.page >= self.cursor.next_page {
            self.cursor.next_page = page.page.saturating_add(1);
            self.cursor.has_more = page.has_more;
        }

        let before = self.merger.len();
        let incoming = page.records.len();
        self.merger.merge(page.records);
        debug!(
            "History page {} merged: {} incoming, {} new, {} total",
            page.page,
            incoming,
            self.merger.len() - before,
            self.merger.len()
        );
        self.merger.records()
    }

    /// Merges records outside of paging (e.g. a run that just finished).
    pub fn add_records(&mut self, records: Vec<HistorySummaryRecord>) -> &[HistorySummaryRecord] {
        self.merger.merge(records)
    }

    /// Empties the history and resets paging.
    pub fn clear(&mut self) {
        self.merger.clear();
        self.cursor = PageCursor::default();
        self.in_flight = false;
    }
}
