use super::config::{ConfigError, Scenario};
use super::event::Event;
use super::event_scheduler::EventScheduler;
use super::execution::config::SimulationConfig;
use super::kernel::Kernel;
use super::model::{BlockedLoad, Model, ModelStats};
use super::snapshot::Snapshot;
use super::types::{LoadId, SimulationTime};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use uuid::Uuid;

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called when the virtual clock moves forward
    fn on_time_advance(&mut self, old_time: SimulationTime, new_time: SimulationTime);

    /// Called after an event has been dispatched to the model
    fn on_event_processed(&mut self, time: SimulationTime, event: &Event);
}

/// Clock, queue and random source handed to the model during dispatch
struct EngineKernel {
    scheduler: EventScheduler,
    current_time: SimulationTime,
    rng: StdRng,
}

impl Kernel for EngineKernel {
    fn now(&self) -> SimulationTime {
        self.current_time
    }

    fn schedule(&mut self, event: Event, delay: SimulationTime) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.scheduler.schedule_at(event, self.current_time + delay);
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Single-threaded discrete-event driver for a [`Model`]
pub struct SimulationEngine {
    run_id: Uuid,
    model: Model,
    kernel: EngineKernel,
    config: SimulationConfig,
    events_processed: u64,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    /// Build the model and enqueue the first arrival at time zero
    pub fn new(scenario: impl Into<Arc<Scenario>>, config: SimulationConfig) -> Result<Self, ConfigError> {
        let mut engine = Self::without_arrivals(scenario, config)?;
        engine.kernel.scheduler.schedule_at(Event::Arrival, 0.0);
        Ok(engine)
    }

    /// Build the model with an empty event queue; loads enter only through
    /// [`SimulationEngine::admit`] or [`SimulationEngine::execute_now`]
    pub fn without_arrivals(
        scenario: impl Into<Arc<Scenario>>,
        config: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let run_id = Uuid::new_v4();
        let model = Model::new(scenario, format!("run {}", run_id.simple()))?;

        Ok(Self {
            run_id,
            model,
            kernel: EngineKernel {
                scheduler: EventScheduler::new(),
                current_time: 0.0,
                rng: StdRng::seed_from_u64(config.seed),
            },
            config,
            events_processed: 0,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Enqueue `event` to fire `delay` after the current time
    pub fn schedule(&mut self, event: Event, delay: SimulationTime) {
        self.kernel.schedule(event, delay);
    }

    /// Dispatch `event` immediately at the current time, bypassing the queue
    pub fn execute_now(&mut self, event: Event) {
        self.dispatch(event);
    }

    /// Admit a load into `procedure` at the current time
    pub fn admit(&mut self, procedure: usize) -> Option<LoadId> {
        self.model.admit(procedure, &mut self.kernel)
    }

    /// Process one event, returns true if an event was dispatched
    pub fn step(&mut self) -> bool {
        if let Some(max) = self.config.max_events {
            if self.events_processed >= max {
                return false;
            }
        }
        let Some(next_time) = self.kernel.scheduler.peek_next_time() else {
            return false;
        };
        if let Some(max) = self.config.max_time {
            if next_time > max {
                return false;
            }
        }
        let Some(scheduled) = self.kernel.scheduler.pop_next() else {
            return false;
        };

        self.advance_clock(scheduled.time);
        self.dispatch(scheduled.event);
        true
    }

    /// Run until the queue drains or a configured horizon is reached, returns the final time
    pub fn run(&mut self) -> SimulationTime {
        while self.step() {}
        let stats = self.model.stats();
        info!(
            "[run {}] stopped at t={:.3} after {} events: {} arrived, {} exited, {} live",
            self.run_id.simple(),
            self.current_time(),
            self.events_processed,
            stats.arrived,
            stats.exited,
            self.model.live_loads()
        );
        self.current_time()
    }

    /// Process every event up to and including `time`, then move the clock to `time`
    pub fn run_until(&mut self, time: SimulationTime) -> SimulationTime {
        while self
            .kernel
            .scheduler
            .peek_next_time()
            .map_or(false, |next| next <= time)
        {
            if !self.step() {
                return self.current_time();
            }
        }
        let within_horizon = self.config.max_time.map_or(true, |max| time <= max);
        if within_horizon {
            self.advance_clock(time);
        }
        self.current_time()
    }

    fn advance_clock(&mut self, time: SimulationTime) {
        let old_time = self.kernel.current_time;
        if time > old_time {
            self.kernel.current_time = time;
            for observer in &mut self.observers {
                observer.on_time_advance(old_time, time);
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        debug!(
            "[run {}] t={:.3} dispatching {}",
            self.run_id.simple(),
            self.kernel.current_time,
            event
        );
        self.model.handle(event, &mut self.kernel);
        self.events_processed += 1;
        let time = self.kernel.current_time;
        for observer in &mut self.observers {
            observer.on_event_processed(time, &event);
        }
    }

    /// Get current simulation time
    pub fn current_time(&self) -> SimulationTime {
        self.kernel.current_time
    }

    /// Check if there are pending events in the scheduler
    pub fn has_pending_events(&self) -> bool {
        self.kernel.scheduler.has_events()
    }

    pub fn queued_events(&self) -> usize {
        self.kernel.scheduler.len()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn stats(&self) -> &ModelStats {
        self.model.stats()
    }

    /// Inspection-only view of every live load and every resource
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.model, self.current_time())
    }

    /// Loads pending longer than the configured threshold; empty when no threshold is set
    pub fn blocked_loads(&self) -> Vec<BlockedLoad> {
        match self.config.blocked_threshold {
            Some(threshold) => self.model.blocked_loads(self.current_time(), threshold),
            None => Vec::new(),
        }
    }
}
