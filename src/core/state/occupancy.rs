use crate::core::types::{LoadId, ResourceId};
use std::collections::HashMap;

/// Bidirectional record of who holds what.
/// `occupation` maps each held resource to its single holder; `occupying` maps
/// each holding load to its resource groups, one group per requirement.
#[derive(Debug, Clone, Default)]
pub struct OccupancyLedger {
    occupation: HashMap<ResourceId, LoadId>,
    occupying: HashMap<LoadId, Vec<Vec<ResourceId>>>,
}

impl OccupancyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self, resource: ResourceId) -> Option<LoadId> {
        self.occupation.get(&resource).copied()
    }

    /// A resource is available to `load` when free or already held by it
    pub fn is_available_to(&self, resource: ResourceId, load: LoadId) -> bool {
        self.holder(resource).map_or(true, |holder| holder == load)
    }

    pub fn groups(&self, load: LoadId) -> Option<&[Vec<ResourceId>]> {
        self.occupying.get(&load).map(Vec::as_slice)
    }

    pub fn held_by(&self, load: LoadId) -> impl Iterator<Item = ResourceId> + '_ {
        self.occupying
            .get(&load)
            .into_iter()
            .flat_map(|groups| groups.iter().flatten().copied())
    }

    /// Record `groups` as held by `load`. The load must not hold anything and
    /// every resource must be free.
    pub fn occupy(&mut self, load: LoadId, groups: Vec<Vec<ResourceId>>) -> Result<(), String> {
        if self.occupying.contains_key(&load) {
            return Err(format!("Load {} already holds resources", load));
        }
        for res in groups.iter().flatten() {
            if let Some(holder) = self.occupation.get(res) {
                return Err(format!("Resource {} already held by load {}", res, holder));
            }
        }
        if groups.iter().all(Vec::is_empty) {
            return Ok(());
        }
        for res in groups.iter().flatten() {
            self.occupation.insert(*res, load);
        }
        self.occupying.insert(load, groups);
        Ok(())
    }

    /// Drop everything `load` holds, returning the freed resources in group order
    pub fn release(&mut self, load: LoadId) -> Vec<ResourceId> {
        let released: Vec<ResourceId> = self
            .occupying
            .remove(&load)
            .map(|groups| groups.into_iter().flatten().collect())
            .unwrap_or_default();
        for res in &released {
            self.occupation.remove(res);
        }
        released
    }

    pub fn occupied_count(&self) -> usize {
        self.occupation.len()
    }

    pub fn holding_loads(&self) -> impl Iterator<Item = LoadId> + '_ {
        self.occupying.keys().copied()
    }

    /// Check that both directions agree
    pub fn verify(&self) -> Result<(), String> {
        let mut counted = 0;
        for (load, groups) in &self.occupying {
            for res in groups.iter().flatten() {
                counted += 1;
                match self.occupation.get(res) {
                    Some(holder) if holder == load => {}
                    Some(holder) => {
                        return Err(format!(
                            "Resource {} listed under load {} but held by {}",
                            res, load, holder
                        ))
                    }
                    None => {
                        return Err(format!(
                            "Resource {} listed under load {} but not occupied",
                            res, load
                        ))
                    }
                }
            }
        }
        if counted != self.occupation.len() {
            return Err(format!(
                "Occupation has {} entries but groups list {}",
                self.occupation.len(),
                counted
            ));
        }
        Ok(())
    }
}
