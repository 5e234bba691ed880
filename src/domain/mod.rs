//! Domain logic modules for the simulation dashboard state.
//!
//! This module contains the pure algorithms the stores are built on:
//! - Sorting (newest-first ordering of history records)
//! - Merging (identity-based deduplication of incoming records)

pub mod sorting;
pub mod merge;
