//! General UI state management.

use crate::model::TrainDetails;
use crate::state::selection::{SelectionCoordinator, SelectionState};

/// State shared by map and panel views that is not tied to loaded results.
///
/// Responsibilities:
/// - Owning the general-purpose station/train selection
/// - Holding the error message reported by the backend layer
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Station/train selection for the map and detail panel
    selection: SelectionCoordinator<TrainDetails>,
    /// Current error message to display (if any)
    error_message: Option<String>,
}

impl UiState {
    /// Creates a new UI state with nothing selected and no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets selection and error.
    pub fn clear(&mut self) {
        self.selection.clear_selection();
        self.error_message = None;
    }

    /// Returns the selection coordinator.
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

    /// Returns the current error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Sets the error message shown to the user.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clears the error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
