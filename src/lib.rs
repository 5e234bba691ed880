//! Client-side state for a rail-transit simulation dashboard.
//!
//! The crate is organized as:
//! - `traits` - identifier types and the identity trait used by history merging
//! - `model` - backend record shapes (history, stations, movements, results)
//! - `domain/` - pure sorting and merge algorithms
//! - `state/` - the stores: selection, history, results and UI state
//! - `app/` - the composed application state, event routing and settings
//! - `io/` - backend response loading, event logs and state snapshots

pub mod traits;
pub mod model;
pub mod domain;
pub mod state;
pub mod app;
pub mod io;

// Export identifier types
pub use traits::{HistoryEntry, SimulationId, StationId, TrainId};

// Export record shapes
pub use model::{
    HistorySummaryRecord, SimulationResults, SimulationSummary,
    StationRecord, TrainDetails, TrainMovementRecord
};

// Export stores
pub use state::{
    Selected, SelectionCoordinator, SelectionState,
    HistoryMerger, HistoryPage, HistoryState, PageCursor,
    ResultsState, UiState
};

// Export application layer
pub use app::{
    AppState, ApplicationCoordinator, DashboardEvent, SelectionScope,
    DashboardSettings, FileStorage, MemoryStorage, SettingsCoordinator, Storage
};

// Export I/O helpers
pub use io::{load_event_log, load_history_page, load_snapshot_history, parse_history_response, SnapshotWriter};
