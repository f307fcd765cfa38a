use crate::core::config::{Procedure, Resource};
use std::collections::HashSet;

/// Candidate resources of a single step.
/// `entries` is the concatenation, in requirement order, of every resource
/// matching each requirement; a resource matching two requirements appears twice.
#[derive(Debug, Clone, Default)]
pub struct StepPool {
    entries: Vec<usize>,
    distinct: Vec<usize>,
    matches_per_requirement: Vec<usize>,
}

impl StepPool {
    /// Resource indices in pool order, duplicates included
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Each resource index once, in order of first appearance
    pub fn distinct(&self) -> &[usize] {
        &self.distinct
    }

    pub fn matches_for(&self, requirement: usize) -> usize {
        self.matches_per_requirement.get(requirement).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A requirement that can never be met with the configured resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsatisfiable {
    pub procedure: usize,
    pub step: usize,
    /// None when the step as a whole needs more distinct resources than it has candidates
    pub requirement: Option<usize>,
    pub required: usize,
    pub available: usize,
}

/// Fixed table of candidate resources indexed by (procedure, step), computed once
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    steps: Vec<Vec<StepPool>>,
}

impl CandidatePool {
    pub fn build(procedures: &[Procedure], resources: &[Resource]) -> Self {
        let steps = procedures
            .iter()
            .map(|procedure| {
                procedure
                    .steps
                    .iter()
                    .map(|step| {
                        let mut pool = StepPool::default();
                        let mut seen = HashSet::new();
                        for req in &step.requirements {
                            let before = pool.entries.len();
                            for (idx, res) in resources.iter().enumerate() {
                                if req.condition.matches(res) {
                                    pool.entries.push(idx);
                                    if seen.insert(idx) {
                                        pool.distinct.push(idx);
                                    }
                                }
                            }
                            pool.matches_per_requirement.push(pool.entries.len() - before);
                        }
                        pool
                    })
                    .collect()
            })
            .collect();

        Self { steps }
    }

    pub fn step(&self, procedure: usize, step: usize) -> Option<&StepPool> {
        self.steps.get(procedure).and_then(|p| p.get(step))
    }

    pub fn procedure_len(&self, procedure: usize) -> usize {
        self.steps.get(procedure).map_or(0, Vec::len)
    }

    /// Requirements whose quantity exceeds what the configuration can ever provide
    pub fn unsatisfiable(&self, procedures: &[Procedure]) -> Vec<Unsatisfiable> {
        let mut found = Vec::new();
        for (p, procedure) in procedures.iter().enumerate() {
            for (s, step) in procedure.steps.iter().enumerate() {
                let Some(pool) = self.step(p, s) else {
                    continue;
                };
                for (r, req) in step.requirements.iter().enumerate() {
                    let available = pool.matches_for(r);
                    if req.quantity > available {
                        found.push(Unsatisfiable {
                            procedure: p,
                            step: s,
                            requirement: Some(r),
                            required: req.quantity,
                            available,
                        });
                    }
                }
                let required: usize = step.requirements.iter().map(|r| r.quantity).sum();
                if required > pool.distinct.len() {
                    found.push(Unsatisfiable {
                        procedure: p,
                        step: s,
                        requirement: None,
                        required,
                        available: pool.distinct.len(),
                    });
                }
            }
        }
        found
    }
}
