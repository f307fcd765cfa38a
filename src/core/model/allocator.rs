use super::Model;
use crate::core::types::{LoadId, ResourceId};
use std::collections::HashSet;

impl Model {
    /// Try to assign every requirement of `(procedure, step)` to `load`.
    ///
    /// Requirements are served in declaration order, first-fit over the step's
    /// candidate pool. A candidate qualifies when it matches the requirement's
    /// condition, is free or already held by `load`, and has not been claimed by
    /// an earlier requirement of this call. Returns one group per requirement,
    /// or `None` as soon as any requirement comes up short; nothing is committed
    /// either way.
    ///
    /// The assignment is greedy and never backtracks, so it can fail where a
    /// different choice for an earlier requirement would have succeeded.
    pub fn request_resources(
        &self,
        procedure: usize,
        step: usize,
        load: LoadId,
    ) -> Option<Vec<Vec<ResourceId>>> {
        let step_def = self.scenario.procedures.get(procedure)?.steps.get(step)?;
        let pool = self.pool.step(procedure, step)?;

        let mut claimed = HashSet::new();
        let mut groups = Vec::with_capacity(step_def.requirements.len());

        for req in &step_def.requirements {
            let mut group = Vec::with_capacity(req.quantity);
            for &idx in pool.entries() {
                if group.len() == req.quantity {
                    break;
                }
                let Some(res) = self.scenario.resources.get(idx) else {
                    continue;
                };
                if !req.condition.matches(res)
                    || claimed.contains(&res.id)
                    || !self.ledger.is_available_to(res.id, load)
                {
                    continue;
                }
                claimed.insert(res.id);
                group.push(res.id);
            }
            if group.len() < req.quantity {
                return None;
            }
            groups.push(group);
        }

        Some(groups)
    }
}
