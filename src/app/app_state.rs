//! Centralized application state for the simulation dashboard.
//!
//! The stores are plain values owned by one `AppState`, constructed once at
//! startup and handed to whoever needs them. Readers borrow snapshots; all
//! mutation goes through the stores' own methods.

use crate::state::{HistoryState, ResultsState, SelectionCoordinator, UiState};
use crate::model::TrainDetails;
use super::events::SelectionScope;

/// Main application state composed of focused state components.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Loaded simulation results and their selection
    pub results: ResultsState,

    /// General UI selection and error message
    pub ui: UiState,

    /// Merged simulation history
    pub history: HistoryState,
}

impl AppState {
    /// Creates a new application state with every store empty.
    pub fn new() -> Self {
        Self {
            results: ResultsState::new(),
            ui: UiState::new(),
            history: HistoryState::new(),
        }
    }

    /// Returns the selection coordinator for `scope`.
    pub fn selection(&self, scope: SelectionScope) -> &SelectionCoordinator<TrainDetails> {
        match scope {
            SelectionScope::Results => self.results.selection(),
            SelectionScope::Ui => self.ui.selection(),
        }
    }

    /// Returns mutable access to the selection coordinator for `scope`.
    pub fn selection_mut(&mut self, scope: SelectionScope) -> &mut SelectionCoordinator<TrainDetails> {
        match scope {
            SelectionScope::Results => self.results.selection_mut(),
            SelectionScope::Ui => self.ui.selection_mut(),
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Resets every store to its initial state.
    pub fn reset(&mut self) {
        self.results.clear_results();
        self.ui.clear();
        self.history.clear();
    }
}
