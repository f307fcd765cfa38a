//! Run configuration for loadflow simulations
//!
//! This module provides the settings that control a single run (seed, horizon,
//! diagnostics threshold) and how independent replications are executed.

use crate::core::config::ConfigError;
use crate::core::types::SimulationTime;
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes for replications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Replications run one after another on the calling thread
    #[default]
    Sequential,
    /// Replications run on a Rayon thread pool; each run stays single-threaded
    Rayon,
}

/// Configuration for simulation execution
///
/// Every run is single-threaded and deterministic for a given seed. The
/// concurrency settings only affect how several replications are scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed of the run's random source
    pub seed: u64,
    /// Stop before dispatching any event later than this time
    pub max_time: Option<SimulationTime>,
    /// Stop after dispatching this many events
    pub max_events: Option<u64>,
    /// Loads pending at least this long are reported as blocked
    pub blocked_threshold: Option<SimulationTime>,
    /// The concurrency mode to use for replications
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel replications
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Default configuration uses seed 0, no horizon and Sequential mode
    pub fn new() -> Self {
        Self {
            seed: 0,
            max_time: None,
            max_events: None,
            blocked_threshold: None,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_time(mut self, time: SimulationTime) -> Self {
        self.max_time = Some(time);
        self
    }

    pub fn with_max_events(mut self, events: u64) -> Self {
        self.max_events = Some(events);
        self
    }

    pub fn with_blocked_threshold(mut self, threshold: SimulationTime) -> Self {
        self.blocked_threshold = Some(threshold);
        self
    }

    /// Set the concurrency mode for replications
    ///
    /// # Arguments
    /// * `mode` - The concurrency mode to use
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel replications
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Whether the run is guaranteed to stop
    pub fn is_bounded(&self) -> bool {
        self.max_time.is_some() || self.max_events.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(t) = self.max_time {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::InvalidSetting(format!(
                    "max_time must be finite and non-negative, got {}",
                    t
                )));
            }
        }
        if let Some(t) = self.blocked_threshold {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::InvalidSetting(format!(
                    "blocked_threshold must be finite and non-negative, got {}",
                    t
                )));
            }
        }
        if self.thread_pool_size == Some(0) {
            return Err(ConfigError::InvalidSetting(
                "thread_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
