use super::types::LoadId;
use serde::{Deserialize, Serialize};

/// Events dispatched by the kernel to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Admit a new load and schedule the next arrival
    Arrival,
    /// Try to move `load` into `step` of `procedure`
    MoveAttempt {
        load: LoadId,
        procedure: usize,
        step: usize,
    },
}

impl Event {
    pub fn move_attempt(load: LoadId, procedure: usize, step: usize) -> Self {
        Event::MoveAttempt {
            load,
            procedure,
            step,
        }
    }

    pub fn load(&self) -> Option<LoadId> {
        match self {
            Event::Arrival => None,
            Event::MoveAttempt { load, .. } => Some(*load),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Arrival => write!(f, "Arrival"),
            Event::MoveAttempt {
                load,
                procedure,
                step,
            } => write!(f, "MoveAttempt(load={}, p={}, s={})", load, procedure, step),
        }
    }
}
