//! I/O modules for backend responses, event logs and state snapshots.

pub mod page_loader;
pub mod snapshot_writer;

// Re-export commonly used types
pub use page_loader::{load_event_log, load_history_page, load_snapshot_history, open_reader, parse_history_response};
pub use snapshot_writer::SnapshotWriter;
