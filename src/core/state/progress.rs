use crate::core::types::{LoadId, StepPosition};
use std::collections::BTreeMap;

/// Last confirmed position of every live load
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    positions: BTreeMap<LoadId, StepPosition>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, load: LoadId, procedure: usize) {
        self.positions.insert(load, StepPosition::unconfirmed(procedure));
    }

    pub fn position(&self, load: LoadId) -> Option<StepPosition> {
        self.positions.get(&load).copied()
    }

    /// Move a live load forward to `step`. Refuses to move backwards.
    pub fn confirm(&mut self, load: LoadId, step: usize) -> Result<(), String> {
        let pos = self
            .positions
            .get_mut(&load)
            .ok_or_else(|| format!("Load {} is not live", load))?;
        if pos.is_at_or_past(step) {
            return Err(format!(
                "Load {} cannot move back from step {:?} to {}",
                load, pos.step, step
            ));
        }
        pos.step = Some(step);
        Ok(())
    }

    pub fn remove(&mut self, load: LoadId) -> Option<StepPosition> {
        self.positions.remove(&load)
    }

    pub fn is_live(&self, load: LoadId) -> bool {
        self.positions.contains_key(&load)
    }

    /// Live loads in id order
    pub fn iter(&self) -> impl Iterator<Item = (LoadId, StepPosition)> + '_ {
        self.positions.iter().map(|(load, pos)| (*load, *pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
