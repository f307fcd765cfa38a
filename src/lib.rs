pub mod core;

// Re-export commonly used types
pub use crate::core::config::{
    ConfigError, DurationDistribution, Procedure, Requirement, Resource, Scenario, ServiceTime,
    Step,
};
pub use crate::core::event::Event;
pub use crate::core::execution::{run_replications, ConcurrencyMode, ReplicationSummary, SimulationConfig};
pub use crate::core::kernel::Kernel;
pub use crate::core::model::{BlockedLoad, Model, ModelStats};
pub use crate::core::simulation_engine::{SimulationEngine, SimulationObserver};
pub use crate::core::snapshot::{LoadSnapshot, ResourceSnapshot, Snapshot};
pub use crate::core::types::{LoadId, ResourceId, SimulationTime, StepPosition};
