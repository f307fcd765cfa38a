use super::config::{ConcurrencyMode, SimulationConfig};
use crate::core::config::{ConfigError, Scenario};
use crate::core::model::ModelStats;
use crate::core::simulation_engine::SimulationEngine;
use crate::core::types::SimulationTime;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of one independent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub end_time: SimulationTime,
    pub events_processed: u64,
    pub stats: ModelStats,
    pub live_loads: usize,
    pub blocked_loads: usize,
}

/// Run one replication per seed and return the summaries in seed order.
///
/// Every replication shares `scenario` and uses `config` with its seed
/// replaced. Runs stay single-threaded; `ConcurrencyMode::Rayon` only spreads
/// whole runs across a thread pool.
pub fn run_replications(
    scenario: impl Into<Arc<Scenario>>,
    config: &SimulationConfig,
    seeds: &[u64],
) -> Result<Vec<ReplicationSummary>, ConfigError> {
    let scenario = scenario.into();
    scenario.validate()?;
    config.validate()?;
    if !config.is_bounded() {
        return Err(ConfigError::UnboundedReplication);
    }

    info!(
        "Running {} replications in {:?} mode",
        seeds.len(),
        config.concurrency_mode
    );

    match config.concurrency_mode {
        ConcurrencyMode::Sequential => seeds
            .iter()
            .map(|seed| run_one(Arc::clone(&scenario), config, *seed))
            .collect(),
        ConcurrencyMode::Rayon => {
            let run_all = || -> Result<Vec<ReplicationSummary>, ConfigError> {
                seeds
                    .par_iter()
                    .map(|seed| run_one(Arc::clone(&scenario), config, *seed))
                    .collect()
            };
            match config.thread_pool_size {
                Some(size) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(size)
                        .build()
                        .map_err(|e| ConfigError::InvalidSetting(format!("thread pool: {}", e)))?;
                    pool.install(run_all)
                }
                None => run_all(),
            }
        }
    }
}

fn run_one(
    scenario: Arc<Scenario>,
    config: &SimulationConfig,
    seed: u64,
) -> Result<ReplicationSummary, ConfigError> {
    let mut engine = SimulationEngine::new(scenario, config.clone().with_seed(seed))?;
    let end_time = engine.run();
    Ok(ReplicationSummary {
        run_id: engine.run_id(),
        seed,
        end_time,
        events_processed: engine.events_processed(),
        stats: *engine.stats(),
        live_loads: engine.model().live_loads(),
        blocked_loads: engine.blocked_loads().len(),
    })
}
