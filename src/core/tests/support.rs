use crate::core::config::{Requirement, ServiceTime, Step};
use crate::core::event::Event;
use crate::core::kernel::Kernel;
use crate::core::types::{LoadId, SimulationTime};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Kernel double that records what the model schedules instead of running it
pub(crate) struct RecordingKernel {
    pub now: SimulationTime,
    pub scheduled: Vec<(SimulationTime, Event)>,
    rng: StdRng,
}

impl RecordingKernel {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            scheduled: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Drain everything scheduled so far
    pub fn take(&mut self) -> Vec<(SimulationTime, Event)> {
        std::mem::take(&mut self.scheduled)
    }

    /// Move attempts scheduled for `load`
    pub fn attempts_for(&self, load: LoadId) -> Vec<(SimulationTime, Event)> {
        self.scheduled
            .iter()
            .filter(|(_, event)| event.load() == Some(load))
            .copied()
            .collect()
    }
}

impl Kernel for RecordingKernel {
    fn now(&self) -> SimulationTime {
        self.now
    }

    fn schedule(&mut self, event: Event, delay: SimulationTime) {
        self.scheduled.push((delay, event));
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Step with a constant service time
pub(crate) fn step(requirements: Vec<Requirement>, service: SimulationTime) -> Step {
    Step::new(requirements, ServiceTime::constant(service))
}

/// Requirement for `quantity` resources whose id is in `ids`
pub(crate) fn needs(ids: &'static [u32], quantity: usize) -> Requirement {
    Requirement::new(move |r| ids.contains(&r.id.raw()), quantity)
}
