pub mod config;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod kernel;
pub mod model;
pub mod simulation_engine;
pub mod snapshot;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
