pub mod distribution;
pub mod procedure;
pub mod resource;
pub mod scenario;

pub use distribution::DurationDistribution;
pub use procedure::{Condition, Procedure, Requirement, ServiceTime, Step};
pub use resource::Resource;
pub use scenario::Scenario;

use crate::core::types::ResourceId;

/// Errors raised while validating a scenario or run configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No procedure to route arriving loads to
    NoProcedures,
    /// Two resources share an id
    DuplicateResource(ResourceId),
    /// Distribution parameters out of range
    InvalidDistribution(String),
    /// Run settings out of range
    InvalidSetting(String),
    /// Replications need a time or event horizon
    UnboundedReplication,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoProcedures => write!(f, "Scenario defines no procedures"),
            ConfigError::DuplicateResource(id) => write!(f, "Duplicate resource id: {}", id),
            ConfigError::InvalidDistribution(msg) => write!(f, "Invalid distribution: {}", msg),
            ConfigError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
            ConfigError::UnboundedReplication => {
                write!(f, "Replications require max_time or max_events")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
