//! Application-level coordination and workflow management.
//!
//! Routes UI interactions and backend arrivals to the stores that own the
//! affected state.

use log::{debug, info, warn};
use crate::app::AppState;
use crate::model::{HistorySummaryRecord, SimulationResults, TrainDetails};
use crate::state::HistoryPage;
use crate::traits::{StationId, TrainId};
use super::events::{DashboardEvent, SelectionScope};

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Applying station/train clicks to the right selection store
/// - Loading and discarding simulation results
/// - Feeding history loads and pages into the history store
/// - Managing error states
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Applies one event to the application state.
    pub fn handle_event(state: &mut AppState, event: DashboardEvent) {
        match event {
            DashboardEvent::StationClicked { scope, station_id } => {
                Self::handle_station_click(state, scope, station_id);
            }
            DashboardEvent::TrainClicked { scope, train_id, details } => {
                Self::handle_train_click(state, scope, train_id, details);
            }
            DashboardEvent::SelectionCleared { scope } => {
                state.selection_mut(scope).clear_selection();
            }
            DashboardEvent::ResultsLoaded { results } => {
                Self::load_results(state, results);
            }
            DashboardEvent::ResultsDiscarded => {
                Self::discard_results(state);
            }
            DashboardEvent::HistoryFetchStarted => {
                state.history.begin_fetch();
            }
            DashboardEvent::HistoryLoaded { records } => {
                Self::load_history(state, records);
            }
            DashboardEvent::HistoryPageArrived { page } => {
                Self::apply_history_page(state, page);
            }
            DashboardEvent::HistoryCleared => {
                state.history.clear();
            }
            DashboardEvent::FetchFailed { message } => {
                Self::report_fetch_failure(state, message);
            }
        }
    }

    /// Handles a click on a station glyph.
    pub fn handle_station_click(state: &mut AppState, scope: SelectionScope, station_id: Option<StationId>) {
        let selection = state.selection_mut(scope).select_station(station_id);
        debug!("{:?} selection after station click: {:?}", scope, selection.selected_station_id());
    }

    /// Handles a click on a train glyph.
    ///
    /// In the results scope, missing details are resolved from the loaded
    /// movement records.
    pub fn handle_train_click(
        state: &mut AppState,
        scope: SelectionScope,
        train_id: Option<TrainId>,
        details: Option<TrainDetails>,
    ) {
        let details = match (scope, details, train_id) {
            (SelectionScope::Results, None, Some(id)) => state.results.train_details(id),
            (_, details, _) => details,
        };

        let selection = state.selection_mut(scope).select_train(train_id, details);
        debug!("{:?} selection after train click: {:?}", scope, selection.selected_train_id());
    }

    /// Loads simulation results, replacing any previous run.
    pub fn load_results(state: &mut AppState, results: SimulationResults) {
        info!(
            "Loaded results for simulation {:?}: {} stations, {} movements",
            results.simulation.id,
            results.stations.len(),
            results.movements.len()
        );
        state.results.set_results(results);
        state.ui.clear_error();
    }

    /// Discards simulation results and any selection that referred to them.
    pub fn discard_results(state: &mut AppState) {
        state.results.clear_results();
        state.ui.selection_mut().clear_selection();
        info!("Simulation results discarded");
    }

    /// Replaces the history with an authoritative full load.
    pub fn load_history(state: &mut AppState, records: Vec<HistorySummaryRecord>) {
        let count = state.history.load_initial(records).len();
        state.ui.clear_error();
        info!("History loaded: {} records", count);
    }

    /// Merges a page of history into the existing list.
    pub fn apply_history_page(state: &mut AppState, page: HistoryPage) {
        state.history.apply_page(page);
        state.ui.clear_error();
    }

    /// Records a failed backend fetch. Stores keep their current contents.
    pub fn report_fetch_failure(state: &mut AppState, message: String) {
        warn!("Fetch failed: {}", message);
        state.history.fetch_failed();
        state.ui.set_error(message);
    }

    /// Applies a sequence of events in order.
    pub fn replay<I>(state: &mut AppState, events: I)
    where
        I: IntoIterator<Item = DashboardEvent>,
    {
        for event in events {
            Self::handle_event(state, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results_with_train(train_id: TrainId) -> SimulationResults {
        serde_json::from_value(json!({
            "movements": [{"TRAIN_ID": train_id, "STATION_ID": 1}]
        }))
        .unwrap()
    }

    #[test]
    fn test_scopes_are_independent() {
        let mut state = AppState::new();

        ApplicationCoordinator::handle_station_click(&mut state, SelectionScope::Results, Some(4));
        ApplicationCoordinator::handle_train_click(&mut state, SelectionScope::Ui, Some(9), Some(json!({"speed": 1})));

        assert_eq!(state.results.selection_state().selected_station_id(), Some(4));
        assert_eq!(state.ui.selection_state().selected_train_id(), Some(9));
        assert_eq!(state.ui.selection_state().selected_station_id(), None);
    }

    #[test]
    fn test_results_scope_resolves_details() {
        let mut state = AppState::new();
        ApplicationCoordinator::load_results(&mut state, results_with_train(7));

        ApplicationCoordinator::handle_train_click(&mut state, SelectionScope::Results, Some(7), None);
        let details = state.results.selection_state().selected_train_details().cloned();
        assert_eq!(details.map(|d| d["TRAIN_ID"].clone()), Some(json!(7)));

        // The UI scope never looks details up
        ApplicationCoordinator::handle_train_click(&mut state, SelectionScope::Ui, Some(7), None);
        assert_eq!(state.ui.selection_state().selected_train_details(), None);
    }

    #[test]
    fn test_discard_results_clears_both_selections() {
        let mut state = AppState::new();
        ApplicationCoordinator::load_results(&mut state, results_with_train(2));
        ApplicationCoordinator::handle_station_click(&mut state, SelectionScope::Results, Some(1));
        ApplicationCoordinator::handle_station_click(&mut state, SelectionScope::Ui, Some(1));

        ApplicationCoordinator::handle_event(&mut state, DashboardEvent::ResultsDiscarded);

        assert!(!state.results.has_results());
        assert!(state.results.selection_state().is_empty());
        assert!(state.ui.selection_state().is_empty());
    }

    #[test]
    fn test_fetch_failure_keeps_history() {
        let mut state = AppState::new();
        ApplicationCoordinator::load_history(&mut state, vec![HistorySummaryRecord::new(1)]);

        ApplicationCoordinator::handle_event(&mut state, DashboardEvent::HistoryFetchStarted);
        ApplicationCoordinator::handle_event(
            &mut state,
            DashboardEvent::FetchFailed { message: "timeout".to_string() },
        );

        assert_eq!(state.history.records().len(), 1);
        assert!(!state.history.is_loading());
        assert_eq!(state.ui.error_message(), Some("timeout"));

        // The next successful arrival clears the error
        ApplicationCoordinator::apply_history_page(
            &mut state,
            HistoryPage { page: 1, has_more: false, records: vec![HistorySummaryRecord::new(2)] },
        );
        assert_eq!(state.ui.error_message(), None);
        assert_eq!(state.history.records().len(), 2);
    }

    #[test]
    fn test_replay_selection_scenario() {
        let mut state = AppState::new();
        let events = vec![
            DashboardEvent::StationClicked { scope: SelectionScope::Ui, station_id: Some(4) },
            DashboardEvent::TrainClicked {
                scope: SelectionScope::Ui,
                train_id: Some(9),
                details: Some(json!({"speed": 1})),
            },
            DashboardEvent::TrainClicked {
                scope: SelectionScope::Ui,
                train_id: Some(9),
                details: Some(json!({"speed": 1})),
            },
        ];
        ApplicationCoordinator::replay(&mut state, events);

        assert!(state.ui.selection_state().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = AppState::new();
        ApplicationCoordinator::load_history(&mut state, vec![HistorySummaryRecord::new(1)]);
        ApplicationCoordinator::handle_station_click(&mut state, SelectionScope::Ui, Some(3));
        ApplicationCoordinator::report_fetch_failure(&mut state, "offline".into());

        state.reset();

        assert!(state.history.records().is_empty());
        assert!(state.ui.selection_state().is_empty());
        assert_eq!(state.ui.error_message(), None);
    }
}
