use crate::core::types::{LoadId, ResourceId, SimulationTime};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Loads blocked waiting for resources, indexed by resource.
/// A load waits on the whole candidate pool of the step it failed to enter.
#[derive(Debug, Clone, Default)]
pub struct PendingRegistry {
    by_resource: HashMap<ResourceId, BTreeSet<LoadId>>,
    since: HashMap<LoadId, SimulationTime>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `load` as waiting on each of `resources`. The waiting clock
    /// starts at the first registration and survives repeated failures.
    pub fn register<I>(&mut self, load: LoadId, resources: I, now: SimulationTime)
    where
        I: IntoIterator<Item = ResourceId>,
    {
        for res in resources {
            self.by_resource.entry(res).or_default().insert(load);
        }
        self.since.entry(load).or_insert(now);
    }

    /// Remove `load` from the given resources and stop its waiting clock
    pub fn clear<I>(&mut self, load: LoadId, resources: I)
    where
        I: IntoIterator<Item = ResourceId>,
    {
        for res in resources {
            if let Some(waiting) = self.by_resource.get_mut(&res) {
                waiting.remove(&load);
                if waiting.is_empty() {
                    self.by_resource.remove(&res);
                }
            }
        }
        self.since.remove(&load);
    }

    /// Remove `load` from every resource
    pub fn remove_load(&mut self, load: LoadId) {
        self.by_resource.retain(|_, waiting| {
            waiting.remove(&load);
            !waiting.is_empty()
        });
        self.since.remove(&load);
    }

    pub fn waiting_on(&self, resource: ResourceId) -> impl Iterator<Item = LoadId> + '_ {
        self.by_resource
            .get(&resource)
            .into_iter()
            .flat_map(|waiting| waiting.iter().copied())
    }

    /// Every distinct load waiting on any of `released`, each listed once, in
    /// order of first appearance
    pub fn waiting_on_any(&self, released: &[ResourceId]) -> Vec<LoadId> {
        let mut seen = HashSet::new();
        released
            .iter()
            .flat_map(|res| self.waiting_on(*res))
            .filter(|load| seen.insert(*load))
            .collect()
    }

    pub fn is_pending(&self, load: LoadId) -> bool {
        self.since.contains_key(&load)
    }

    pub fn is_pending_on(&self, load: LoadId, resource: ResourceId) -> bool {
        self.by_resource
            .get(&resource)
            .map_or(false, |waiting| waiting.contains(&load))
    }

    pub fn pending_since(&self, load: LoadId) -> Option<SimulationTime> {
        self.since.get(&load).copied()
    }

    /// Loads that have been waiting for at least `threshold`, sorted by id
    pub fn blocked_for(&self, now: SimulationTime, threshold: SimulationTime) -> Vec<(LoadId, SimulationTime)> {
        let mut blocked: Vec<_> = self
            .since
            .iter()
            .filter(|(_, since)| now - **since >= threshold)
            .map(|(load, since)| (*load, *since))
            .collect();
        blocked.sort_by_key(|(load, _)| *load);
        blocked
    }

    /// Every (resource, waiting load) pair
    pub fn entries(&self) -> impl Iterator<Item = (ResourceId, LoadId)> + '_ {
        self.by_resource
            .iter()
            .flat_map(|(res, waiting)| waiting.iter().map(move |load| (*res, *load)))
    }

    pub fn pending_count(&self) -> usize {
        self.since.len()
    }
}
