//! Backend record shapes consumed by the state stores.
//!
//! Only the identity fields are interpreted; everything else the backend sends
//! is kept in a flattened, order-preserving map and passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::traits::{HistoryEntry, SimulationId, StationId, TrainId};

/// Opaque train detail payload carried alongside a train selection.
///
/// The concrete shape belongs to whoever fetched the details; the selection
/// stores never look inside it.
pub type TrainDetails = Value;

/// Lightweight summary of a past simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummaryRecord {
    #[serde(rename = "SIMULATION_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SimulationId>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl HistorySummaryRecord {
    /// Creates a record with the given ID and no other fields.
    pub fn new(id: SimulationId) -> Self {
        Self {
            id: Some(id),
            fields: Map::new(),
        }
    }

    /// Creates a record with the given ID and opaque fields.
    pub fn with_fields(id: SimulationId, fields: Map<String, Value>) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }

    /// Returns an opaque field by backend key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl HistoryEntry for HistorySummaryRecord {
    #[inline]
    fn simulation_id(&self) -> Option<SimulationId> {
        self.id
    }
}

/// A station as reported in simulation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "STATION_ID")]
    pub id: StationId,
    #[serde(rename = "STATION_NAME", default)]
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One movement step of a train (arrival/departure at a station).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainMovementRecord {
    #[serde(rename = "TRAIN_ID")]
    pub train_id: TrainId,
    #[serde(rename = "STATION_ID", default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<StationId>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Summary of the simulation run whose results are loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    #[serde(rename = "SIMULATION_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SimulationId>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Everything the backend returns for one simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResults {
    #[serde(default)]
    pub simulation: SimulationSummary,
    #[serde(default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub movements: Vec<TrainMovementRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_record_keeps_opaque_fields() {
        let json = r#"{"SIMULATION_ID": 7, "NAME": "peak hour", "CREATED_AT": "2024-03-01"}"#;
        let record: HistorySummaryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.field("NAME"), Some(&Value::from("peak hour")));

        // Opaque fields keep backend order when written back
        let written = serde_json::to_string(&record).unwrap();
        assert_eq!(written, r#"{"SIMULATION_ID":7,"NAME":"peak hour","CREATED_AT":"2024-03-01"}"#);
    }

    #[test]
    fn test_history_record_without_id() {
        let record: HistorySummaryRecord = serde_json::from_str(r#"{"NAME": "orphan"}"#).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.simulation_id(), None);
    }

    #[test]
    fn test_results_defaults() {
        let results: SimulationResults = serde_json::from_str(r#"{"stations": [{"STATION_ID": 3}]}"#).unwrap();
        assert_eq!(results.stations.len(), 1);
        assert_eq!(results.stations[0].name, "");
        assert!(results.movements.is_empty());
        assert_eq!(results.simulation.id, None);
    }
}
