//! Application-level modules for the simulation dashboard.
//!
//! This module contains the event coordinator, settings persistence and the
//! centralized state holder.

mod app_state;
mod application_coordinator;
mod events;
mod settings_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use events::{DashboardEvent, SelectionScope};
pub use settings_coordinator::{
    DashboardSettings, FileStorage, MemoryStorage, SettingsCoordinator, Storage, DASHBOARD_SETTINGS_KEY,
};
