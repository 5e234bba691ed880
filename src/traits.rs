/// Type alias for station IDs (backend `STATION_ID`)
pub type StationId = i64;

/// Type alias for train IDs (backend `TRAIN_ID`)
pub type TrainId = i64;

/// Type alias for simulation run IDs (backend `SIMULATION_ID`)
pub type SimulationId = i64;

/// Trait for records that can be merged into a history list.
///
/// The merge logic only ever looks at the identity of a record; every other
/// field is carried through untouched.
///
/// Records without an identity never deduplicate and are ordered after all
/// identified records.
pub trait HistoryEntry {
    /// Returns the record's simulation ID, if the backend supplied one
    fn simulation_id(&self) -> Option<SimulationId>;
}

impl<T: HistoryEntry + ?Sized> HistoryEntry for &T {
    #[inline]
    fn simulation_id(&self) -> Option<SimulationId> {
        (**self).simulation_id()
    }
}

impl HistoryEntry for SimulationId {
    #[inline]
    fn simulation_id(&self) -> Option<SimulationId> {
        Some(*self)
    }
}

impl HistoryEntry for Option<SimulationId> {
    #[inline]
    fn simulation_id(&self) -> Option<SimulationId> {
        *self
    }
}
