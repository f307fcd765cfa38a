use super::{candidate_ids, flatten_ids, Model};
use crate::core::event::Event;
use crate::core::kernel::Kernel;
use crate::core::types::{LoadId, ResourceId};
use log::{debug, error, info, trace};

impl Model {
    /// Try to move `load` into `step` of `procedure`.
    ///
    /// Attempts that do not target the load's next step are stale and ignored.
    /// Reaching one past the last step exits the load. Otherwise the load either
    /// enters the step, holding its new resources, or waits on the step's pool.
    /// Whatever was freed wakes each distinct waiting load exactly once.
    pub(crate) fn attempt_move(
        &mut self,
        load: LoadId,
        procedure: usize,
        step: usize,
        kernel: &mut dyn Kernel,
    ) {
        let Some(position) = self.progress.position(load) else {
            trace!("[{}] t={:.3} load {} is gone, dropping attempt at step {}", self.label, kernel.now(), load, step);
            self.stats.stale_events += 1;
            return;
        };
        if position.procedure != procedure || position.next_step() != step {
            trace!(
                "[{}] t={:.3} stale attempt for load {} at p={} s={} (now at {:?})",
                self.label,
                kernel.now(),
                load,
                procedure,
                step,
                position.step
            );
            self.stats.stale_events += 1;
            return;
        }
        let Some(n_steps) = self.steps_in(procedure) else {
            error!("[{}] load {} refers to unknown procedure {}", self.label, load, procedure);
            return;
        };

        let released = if step == n_steps {
            self.exit(load, kernel)
        } else {
            match self.request_resources(procedure, step, load) {
                Some(groups) => self.enter_step(load, procedure, step, groups, kernel),
                None => {
                    self.wait_for_step(load, procedure, step, kernel);
                    Vec::new()
                }
            }
        };

        self.schedule_retries(&released, kernel);
    }

    fn enter_step(
        &mut self,
        load: LoadId,
        procedure: usize,
        step: usize,
        groups: Vec<Vec<ResourceId>>,
        kernel: &mut dyn Kernel,
    ) -> Vec<ResourceId> {
        if let Err(e) = self.progress.confirm(load, step) {
            error!("[{}] {}", self.label, e);
            return Vec::new();
        }

        // resources held across the step boundary stay occupied
        let kept = flatten_ids(&groups);
        let released: Vec<ResourceId> = self
            .ledger
            .release(load)
            .into_iter()
            .filter(|res| !kept.contains(res))
            .collect();

        debug!(
            "[{}] t={:.3} load {} entered p={} s={} holding {:?}, released {:?}",
            self.label,
            kernel.now(),
            load,
            procedure,
            step,
            groups,
            released
        );
        if let Err(e) = self.ledger.occupy(load, groups) {
            error!("[{}] {}", self.label, e);
        }
        self.pending.clear(
            load,
            candidate_ids(&self.scenario.resources, &self.pool, procedure, step),
        );

        let service = self
            .scenario
            .procedures
            .get(procedure)
            .and_then(|p| p.steps.get(step))
            .map_or(0.0, |s| s.service_time.sample(kernel.rng()));
        kernel.schedule(Event::move_attempt(load, procedure, step + 1), service);

        self.stats.acquisitions += 1;
        self.stats.resources_released += released.len() as u64;
        released
    }

    fn wait_for_step(&mut self, load: LoadId, procedure: usize, step: usize, kernel: &mut dyn Kernel) {
        let now = kernel.now();
        debug!(
            "[{}] t={:.3} load {} waiting for p={} s={}",
            self.label, now, load, procedure, step
        );
        self.pending.register(
            load,
            candidate_ids(&self.scenario.resources, &self.pool, procedure, step),
            now,
        );
        self.stats.failed_attempts += 1;
    }

    fn exit(&mut self, load: LoadId, kernel: &mut dyn Kernel) -> Vec<ResourceId> {
        let released = self.ledger.release(load);
        self.pending.remove_load(load);
        self.progress.remove(load);
        info!(
            "[{}] t={:.3} load {} exited, released {:?}",
            self.label,
            kernel.now(),
            load,
            released
        );
        self.stats.exited += 1;
        self.stats.resources_released += released.len() as u64;
        released
    }

    /// Schedule one retry per distinct load waiting on any of `released`
    fn schedule_retries(&mut self, released: &[ResourceId], kernel: &mut dyn Kernel) {
        if released.is_empty() {
            return;
        }
        for waiting in self.pending.waiting_on_any(released) {
            let Some(position) = self.progress.position(waiting) else {
                continue;
            };
            let step = position.next_step();
            debug!(
                "[{}] t={:.3} retrying load {} at p={} s={}",
                self.label,
                kernel.now(),
                waiting,
                position.procedure,
                step
            );
            kernel.schedule(Event::move_attempt(waiting, position.procedure, step), 0.0);
            self.stats.retries_scheduled += 1;
        }
    }
}
