pub mod candidate_pool;
pub mod occupancy;
pub mod pending;
pub mod progress;

pub use candidate_pool::{CandidatePool, StepPool, Unsatisfiable};
pub use occupancy::OccupancyLedger;
pub use pending::PendingRegistry;
pub use progress::ProgressTracker;
