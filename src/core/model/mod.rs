//! Resource-contention model: loads move through procedures step by step,
//! holding the resources each step requires.
//!
//! All mutation happens inside [`Model::handle`], called by the kernel with one
//! event at a time. Follow-up work is always scheduled through the [`Kernel`]
//! port, never run inline, except for the first move attempt of an arriving load.

pub mod allocator;
pub mod arrival;
pub mod move_attempt;
pub mod stats;

pub use stats::ModelStats;

use crate::core::config::{ConfigError, Resource, Scenario};
use crate::core::event::Event;
use crate::core::kernel::Kernel;
use crate::core::state::{CandidatePool, OccupancyLedger, PendingRegistry, ProgressTracker};
use crate::core::types::{LoadId, ResourceId, SimulationTime, StepPosition};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A load that has been waiting for resources longer than a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockedLoad {
    pub load: LoadId,
    pub position: StepPosition,
    /// Step the load is trying to enter
    pub target_step: usize,
    pub since: SimulationTime,
    pub waited: SimulationTime,
}

pub struct Model {
    label: String,
    scenario: Arc<Scenario>,
    pool: CandidatePool,
    ledger: OccupancyLedger,
    pending: PendingRegistry,
    progress: ProgressTracker,
    next_load: u64,
    stats: ModelStats,
}

impl Model {
    /// Validate `scenario` and precompute its candidate pools
    pub fn new(scenario: impl Into<Arc<Scenario>>, label: impl Into<String>) -> Result<Self, ConfigError> {
        let scenario = scenario.into();
        scenario.validate()?;
        let label = label.into();

        let pool = CandidatePool::build(&scenario.procedures, &scenario.resources);
        for gap in pool.unsatisfiable(&scenario.procedures) {
            match gap.requirement {
                Some(req) => warn!(
                    "[{}] procedure {} step {} requirement {} needs {} resources but only {} match; loads will wait forever",
                    label, gap.procedure, gap.step, req, gap.required, gap.available
                ),
                None => warn!(
                    "[{}] procedure {} step {} needs {} distinct resources but has {} candidates; loads will wait forever",
                    label, gap.procedure, gap.step, gap.required, gap.available
                ),
            }
        }

        Ok(Self {
            label,
            scenario,
            pool,
            ledger: OccupancyLedger::new(),
            pending: PendingRegistry::new(),
            progress: ProgressTracker::new(),
            next_load: 0,
            stats: ModelStats::default(),
        })
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: Event, kernel: &mut dyn Kernel) {
        match event {
            Event::Arrival => self.arrive(kernel),
            Event::MoveAttempt {
                load,
                procedure,
                step,
            } => self.attempt_move(load, procedure, step, kernel),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn candidate_pool(&self) -> &CandidatePool {
        &self.pool
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn pending(&self) -> &PendingRegistry {
        &self.pending
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self, load: LoadId) -> Option<StepPosition> {
        self.progress.position(load)
    }

    pub fn live_loads(&self) -> usize {
        self.progress.len()
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.scenario.resources.iter().find(|r| r.id == id)
    }

    /// Loads that have been pending for at least `threshold` at time `now`
    pub fn blocked_loads(&self, now: SimulationTime, threshold: SimulationTime) -> Vec<BlockedLoad> {
        self.pending
            .blocked_for(now, threshold)
            .into_iter()
            .filter_map(|(load, since)| {
                let position = self.progress.position(load)?;
                Some(BlockedLoad {
                    load,
                    position,
                    target_step: position.next_step(),
                    since,
                    waited: now - since,
                })
            })
            .collect()
    }

    /// Check the cross-table invariants: the ledger agrees with itself, every
    /// holder is live and confirmed, and every pending registration belongs to
    /// the candidate pool of the step its load is trying to enter.
    pub fn verify(&self) -> Result<(), String> {
        self.ledger.verify()?;

        for load in self.ledger.holding_loads() {
            match self.progress.position(load) {
                Some(StepPosition { step: Some(_), .. }) => {}
                Some(_) => return Err(format!("Load {} holds resources before entering any step", load)),
                None => return Err(format!("Load {} holds resources but is not live", load)),
            }
        }

        for (res, load) in self.pending.entries() {
            let position = self
                .progress
                .position(load)
                .ok_or_else(|| format!("Load {} pending on {} but not live", load, res))?;
            let target = position.next_step();
            let in_pool = candidate_ids(&self.scenario.resources, &self.pool, position.procedure, target)
                .any(|candidate| candidate == res);
            if !in_pool {
                return Err(format!(
                    "Load {} pending on {} outside the pool of its target step {}",
                    load, res, target
                ));
            }
        }

        Ok(())
    }

    fn steps_in(&self, procedure: usize) -> Option<usize> {
        self.scenario.procedures.get(procedure).map(|p| p.len())
    }
}

/// Distinct candidate resource ids of `(procedure, step)`
fn candidate_ids<'a>(
    resources: &'a [Resource],
    pool: &'a CandidatePool,
    procedure: usize,
    step: usize,
) -> impl Iterator<Item = ResourceId> + 'a {
    pool.step(procedure, step)
        .into_iter()
        .flat_map(|p| p.distinct().iter())
        .filter_map(move |idx| resources.get(*idx).map(|r| r.id))
}

fn flatten_ids(groups: &[Vec<ResourceId>]) -> HashSet<ResourceId> {
    groups.iter().flatten().copied().collect()
}
