use serde::{Deserialize, Serialize};

/// Virtual simulation time, in model time units
pub type SimulationTime = f64;

/// Opaque identity handed to every load on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadId(pub(crate) u64);

impl LoadId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LoadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a configured resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub(crate) u32);

impl ResourceId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A load's position: its procedure and the last step it was confirmed at.
/// `step == None` means the load has not been confirmed at any step yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPosition {
    pub procedure: usize,
    pub step: Option<usize>,
}

impl StepPosition {
    pub fn unconfirmed(procedure: usize) -> Self {
        Self { procedure, step: None }
    }

    pub fn confirmed(procedure: usize, step: usize) -> Self {
        Self {
            procedure,
            step: Some(step),
        }
    }

    /// The step the load would attempt next
    pub fn next_step(&self) -> usize {
        self.step.map_or(0, |s| s + 1)
    }

    /// Whether an attempt at `target` would not move the load forward
    pub fn is_at_or_past(&self, target: usize) -> bool {
        matches!(self.step, Some(s) if s >= target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfirmed_position_targets_step_zero() {
        let pos = StepPosition::unconfirmed(1);
        assert_eq!(pos.next_step(), 0);
        assert!(!pos.is_at_or_past(0));
    }

    #[test]
    fn test_confirmed_position_guards_earlier_targets() {
        let pos = StepPosition::confirmed(0, 2);
        assert_eq!(pos.next_step(), 3);
        assert!(pos.is_at_or_past(2));
        assert!(pos.is_at_or_past(1));
        assert!(!pos.is_at_or_past(3));
    }
}
