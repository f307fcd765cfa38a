use serde::{Deserialize, Serialize};

/// Running counters kept by the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStats {
    pub arrived: u64,
    pub exited: u64,
    /// Successful step entries
    pub acquisitions: u64,
    /// Move attempts that could not get their resources
    pub failed_attempts: u64,
    /// Move attempts dropped by the duplicate-event guard
    pub stale_events: u64,
    pub retries_scheduled: u64,
    pub resources_released: u64,
}

impl ModelStats {
    pub fn live_loads(&self) -> u64 {
        self.arrived - self.exited
    }
}
