//! Events that drive the dashboard state.
//!
//! UI clicks and backend arrivals are expressed as one serializable event
//! vocabulary so they can be replayed from a log.

use serde::{Deserialize, Serialize};
use crate::model::{HistorySummaryRecord, SimulationResults, TrainDetails};
use crate::state::HistoryPage;
use crate::traits::{StationId, TrainId};

/// Which selection store an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    /// Selection scoped to the loaded simulation results
    Results,
    /// General UI selection
    Ui,
}

/// A UI interaction or backend arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    StationClicked {
        scope: SelectionScope,
        #[serde(default)]
        station_id: Option<StationId>,
    },
    TrainClicked {
        scope: SelectionScope,
        #[serde(default)]
        train_id: Option<TrainId>,
        #[serde(default)]
        details: Option<TrainDetails>,
    },
    SelectionCleared {
        scope: SelectionScope,
    },
    ResultsLoaded {
        results: SimulationResults,
    },
    ResultsDiscarded,
    HistoryFetchStarted,
    HistoryLoaded {
        records: Vec<HistorySummaryRecord>,
    },
    HistoryPageArrived {
        page: HistoryPage,
    },
    HistoryCleared,
    FetchFailed {
        message: String,
    },
}
