//! Simulation results state management.
//!
//! This module encapsulates the results of the currently loaded simulation run
//! together with the station/train selection scoped to those results.

use serde_json::{json, Value};
use crate::model::{SimulationResults, StationRecord, TrainDetails, TrainMovementRecord};
use crate::state::selection::{SelectionCoordinator, SelectionState};
use crate::traits::{StationId, TrainId};

/// State related to the loaded simulation results.
///
/// Responsibilities:
/// - Managing results lifetime
/// - Owning the selection scoped to these results
/// - Resolving station and train lookups for detail panels
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    /// The currently loaded results (if any)
    results: Option<SimulationResults>,
    /// Selection scoped to the loaded results
    selection: SelectionCoordinator<TrainDetails>,
}

impl ResultsState {
    /// Creates a new results state with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads new results. Any selection made against older results is cleared.
    pub fn set_results(&mut self, results: SimulationResults) {
        self.results = Some(results);
        self.selection.clear_selection();
    }

    /// Discards the results and the selection that referred to them.
    pub fn clear_results(&mut self) {
        self.results = None;
        self.selection.clear_selection();
    }

    /// Returns the loaded results, if any.
    pub fn results(&self) -> Option<&SimulationResults> {
        self.results.as_ref()
    }

    /// Returns true if results are loaded.
    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    // ===== Selection =====

    /// Returns the selection coordinator for these results.
    pub fn selection(&self) -> &SelectionCoordinator<TrainDetails> {
        &self.selection
    }

    /// Returns mutable access to the selection coordinator.
    pub fn selection_mut(&mut self) -> &mut SelectionCoordinator<TrainDetails> {
        &mut self.selection
    }

    /// Returns the current selection snapshot.
    pub fn selection_state(&self) -> &SelectionState<TrainDetails> {
        self.selection.state()
    }

    // ===== Lookups =====

    /// Returns the station with `id`, if the results contain it.
    pub fn station(&self, id: StationId) -> Option<&StationRecord> {
        self.results.as_ref()?.stations.iter().find(|s| s.id == id)
    }

    /// Returns all movement records of a train, in backend order.
    pub fn train_movements(&self, id: TrainId) -> Vec<&TrainMovementRecord> {
        match &self.results {
            Some(results) => results.movements.iter().filter(|m| m.train_id == id).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the distinct train IDs in the results, ascending.
    pub fn train_ids(&self) -> Vec<TrainId> {
        let mut ids: Vec<TrainId> = self
            .results
            .iter()
            .flat_map(|r| r.movements.iter().map(|m| m.train_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Builds a detail payload for a train from its movement records.
    ///
    /// Returns `None` if no results are loaded or the train has no movements.
    pub fn train_details(&self, id: TrainId) -> Option<TrainDetails> {
        let movements = self.train_movements(id);
        if movements.is_empty() {
            return None;
        }

        let movements: Vec<Value> = movements
            .into_iter()
            .filter_map(|m| serde_json::to_value(m).ok())
            .collect();

        Some(json!({
            "TRAIN_ID": id,
            "movements": movements,
        }))
    }
}
