use super::event::Event;
use super::types::SimulationTime;
use rand::RngCore;

/// Scheduling port the model calls while an event is being dispatched.
/// Implementations own the virtual clock, the event queue and the random source.
pub trait Kernel {
    /// Current virtual time
    fn now(&self) -> SimulationTime;

    /// Enqueue `event` to fire at `now() + delay`
    fn schedule(&mut self, event: Event, delay: SimulationTime);

    /// The run's random source
    fn rng(&mut self) -> &mut dyn RngCore;
}
