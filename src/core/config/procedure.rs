use super::distribution::DurationDistribution;
use super::resource::Resource;
use crate::core::types::SimulationTime;
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

type ConditionFn = dyn Fn(&Resource) -> bool + Send + Sync;
type ServiceTimeFn = dyn Fn(&mut dyn RngCore) -> SimulationTime + Send + Sync;

/// Pure predicate over a resource's static attributes
#[derive(Clone)]
pub struct Condition(Arc<ConditionFn>);

impl Condition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Resource) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        (self.0)(resource)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

/// Service-time sampler for a step
#[derive(Clone)]
pub struct ServiceTime(Arc<ServiceTimeFn>);

impl ServiceTime {
    pub fn new<F>(sampler: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> SimulationTime + Send + Sync + 'static,
    {
        Self(Arc::new(sampler))
    }

    pub fn from_distribution(distribution: DurationDistribution) -> Self {
        Self::new(move |rng| distribution.sample(rng))
    }

    pub fn constant(duration: SimulationTime) -> Self {
        Self::from_distribution(DurationDistribution::Constant(duration))
    }

    /// Sample a service duration; negative or non-finite draws become zero
    pub fn sample(&self, rng: &mut dyn RngCore) -> SimulationTime {
        let t = (self.0)(rng);
        if t.is_finite() {
            t.max(0.0)
        } else {
            0.0
        }
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceTime(..)")
    }
}

/// A condition plus the number of distinct resources needed that satisfy it
#[derive(Debug, Clone)]
pub struct Requirement {
    pub condition: Condition,
    pub quantity: usize,
}

impl Requirement {
    pub fn new<F>(predicate: F, quantity: usize) -> Self
    where
        F: Fn(&Resource) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Condition::new(predicate),
            quantity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Step {
    pub requirements: Vec<Requirement>,
    pub service_time: ServiceTime,
}

impl Step {
    pub fn new(requirements: Vec<Requirement>, service_time: ServiceTime) -> Self {
        Self {
            requirements,
            service_time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Procedure {
    pub steps: Vec<Step>,
}

impl Procedure {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
