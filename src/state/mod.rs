//! State management modules for the simulation dashboard.
//!
//! This module contains state-only logic (no rendering concerns):
//! - Selection state (single active station or train, toggle-to-clear)
//! - History state (merged, deduplicated simulation history with paging)
//! - Results state (loaded simulation results and their scoped selection)
//! - UI state (general selection and user-facing error message)

mod selection;
mod history_state;
mod results_state;
mod ui_state;

pub use selection::{Selected, SelectionCoordinator, SelectionState};
pub use history_state::{HistoryMerger, HistoryPage, HistoryState, PageCursor};
pub use results_state::ResultsState;
pub use ui_state::UiState;
