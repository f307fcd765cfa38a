use super::distribution::DurationDistribution;
use super::procedure::Procedure;
use super::resource::Resource;
use super::ConfigError;
use std::collections::HashSet;

/// The static configuration of a run: procedures, resources and the arrival process.
/// Supplied once and immutable while the simulation runs.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub procedures: Vec<Procedure>,
    pub resources: Vec<Resource>,
    pub inter_arrival: DurationDistribution,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_procedure(mut self, procedure: Procedure) -> Self {
        self.procedures.push(procedure);
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_resources<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = Resource>,
    {
        self.resources.extend(resources);
        self
    }

    pub fn with_inter_arrival(mut self, distribution: DurationDistribution) -> Self {
        self.inter_arrival = distribution;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.procedures.is_empty() {
            return Err(ConfigError::NoProcedures);
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.id) {
                return Err(ConfigError::DuplicateResource(resource.id));
            }
        }

        self.inter_arrival.validate()
    }
}
