use super::Model;
use crate::core::event::Event;
use crate::core::kernel::Kernel;
use crate::core::types::LoadId;
use log::{info, warn};
use rand::Rng;

impl Model {
    /// Admit a new load into a uniformly chosen procedure, then schedule the
    /// next arrival after a sampled inter-arrival time.
    pub(crate) fn arrive(&mut self, kernel: &mut dyn Kernel) {
        let n_procedures = self.scenario.procedures.len();
        if n_procedures == 0 {
            warn!("[{}] no procedures configured, arrivals stop", self.label);
            return;
        }
        let procedure = kernel.rng().gen_range(0..n_procedures);
        self.admit(procedure, kernel);

        let delay = self.scenario.inter_arrival.sample(kernel.rng());
        kernel.schedule(Event::Arrival, delay);
    }

    /// Create a load in `procedure` and make its first move attempt right away.
    /// Returns `None` for an unknown procedure.
    pub fn admit(&mut self, procedure: usize, kernel: &mut dyn Kernel) -> Option<LoadId> {
        if procedure >= self.scenario.procedures.len() {
            warn!("[{}] cannot admit into unknown procedure {}", self.label, procedure);
            return None;
        }
        let load = LoadId::new(self.next_load);
        self.next_load += 1;
        self.progress.admit(load, procedure);
        self.stats.arrived += 1;
        info!(
            "[{}] t={:.3} load {} arrived for procedure {}",
            self.label,
            kernel.now(),
            load,
            procedure
        );

        self.attempt_move(load, procedure, 0, kernel);
        Some(load)
    }
}
