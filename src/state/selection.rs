//! Station/train selection state management.
//!
//! This module encapsulates the single-active-selection rule shared by every
//! store that shows a detail panel: at most one station or one train is
//! selected, re-selecting the current entity clears the selection, and any
//! selection can be cleared unconditionally.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use crate::traits::{StationId, TrainId};

/// What is currently selected.
///
/// Station and train selection are variants of one enum, so a state where
/// both are selected cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Selected<D> {
    None,
    Station(StationId),
    Train {
        id: TrainId,
        details: Option<D>,
    },
}

/// Snapshot of a selection store.
///
/// Responsibilities:
/// - Holding the current selection
/// - Providing field-style selection queries for detail panels
///
/// Mutation goes through [`SelectionCoordinator`]; readers only see snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState<D> {
    selected: Selected<D>,
}

impl<D> Default for SelectionState<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SelectionState<D> {
    /// Creates a new selection state with nothing selected.
    pub fn new() -> Self {
        Self {
            selected: Selected::None,
        }
    }

    // ===== Selection Queries =====

    /// Returns the current selection.
    pub fn selected(&self) -> &Selected<D> {
        &self.selected
    }

    /// Returns the currently selected station ID, if any.
    pub fn selected_station_id(&self) -> Option<StationId> {
        match self.selected {
            Selected::Station(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the currently selected train ID, if any.
    pub fn selected_train_id(&self) -> Option<TrainId> {
        match self.selected {
            Selected::Train { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Returns the detail payload of the selected train, if any.
    pub fn selected_train_details(&self) -> Option<&D> {
        match &self.selected {
            Selected::Train { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Returns true if neither a station nor a train is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self.selected, Selected::None)
    }
}

impl<D: Serialize> Serialize for SelectionState<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SelectionState", 3)?;
        s.serialize_field("selectedStationId", &self.selected_station_id())?;
        s.serialize_field("selectedTrainId", &self.selected_train_id())?;
        s.serialize_field("selectedTrainDetails", &self.selected_train_details())?;
        s.end()
    }
}

/// Coordinates selection changes for one store.
///
/// The dashboard keeps two of these (simulation results and general UI);
/// both follow exactly the same rules:
/// - selecting a station clears any train, and vice versa
/// - selecting the entity that is already selected clears everything
/// - selecting `None` clears everything
#[derive(Debug, Clone)]
pub struct SelectionCoordinator<D> {
    state: SelectionState<D>,
}

impl<D> Default for SelectionCoordinator<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SelectionCoordinator<D> {
    /// Creates a coordinator with nothing selected.
    pub fn new() -> Self {
        Self {
            state: SelectionState::new(),
        }
    }

    /// Returns the current selection snapshot.
    pub fn state(&self) -> &SelectionState<D> {
        &self.state
    }

    /// Selects a station, or clears the selection if it is already selected.
    pub fn select_station(&mut self, station_id: Option<StationId>) -> &SelectionState<D> {
        self.state.selected = match station_id {
            Some(id) if self.state.selected_station_id() != Some(id) => Selected::Station(id),
            _ => Selected::None,
        };
        &self.state
    }

    /// Selects a train with its details, or clears the selection if the
    /// train is already selected.
    ///
    /// Toggling compares train IDs only; the details passed on a toggle-off
    /// are discarded.
    pub fn select_train(&mut self, train_id: Option<TrainId>, details: Option<D>) -> &SelectionState<D> {
        self.state.selected = match train_id {
            Some(id) if self.state.selected_train_id() != Some(id) => Selected::Train { id, details },
            _ => Selected::None,
        };
        &self.state
    }

    /// Clears the selection regardless of what is selected.
    pub fn clear_selection(&mut self) -> &SelectionState<D> {
        self.state.selected = Selected::None;
        &self.state
    }
}

impl<D: Clone> SelectionCoordinator<D> {
    /// Returns an owned copy of the current selection.
    pub fn snapshot(&self) -> SelectionState<D> {
        self.state.clone()
    }
}
