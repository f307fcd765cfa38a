pub mod config;
pub mod replications;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use replications::{run_replications, ReplicationSummary};
