use super::support::{needs, step};
use crate::core::config::{DurationDistribution, Procedure, Resource, Scenario};
use crate::core::event::Event;
use crate::core::execution::config::SimulationConfig;
use crate::core::simulation_engine::{SimulationEngine, SimulationObserver};
use crate::core::types::{LoadId, SimulationTime};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

fn contended_scenario() -> Scenario {
    Scenario::new()
        .with_procedure(Procedure::new(vec![
            step(vec![needs(&[6, 7, 8, 9], 2), needs(&[0, 1, 2], 1)], 5.0),
            step(vec![needs(&[8, 9], 1), needs(&[3, 4], 1)], 5.0),
        ]))
        .with_procedure(Procedure::new(vec![
            step(vec![needs(&[7], 1), needs(&[0, 1, 2, 3], 1)], 5.0),
            step(vec![needs(&[4, 5, 6, 7, 8, 9], 2), needs(&[2, 3, 4, 5], 1)], 5.0),
            step(vec![needs(&[0, 1, 2], 1), needs(&[7, 8, 9], 1)], 5.0),
        ]))
        .with_resources((0..10).map(Resource::numbered))
        .with_inter_arrival(DurationDistribution::exponential(4.0))
}

#[derive(Default)]
struct Counts {
    advances: usize,
    events: usize,
    last_time: SimulationTime,
}

struct CountingObserver(Rc<RefCell<Counts>>);

impl SimulationObserver for CountingObserver {
    fn on_time_advance(&mut self, old_time: SimulationTime, new_time: SimulationTime) {
        let mut counts = self.0.borrow_mut();
        assert!(new_time > old_time);
        counts.advances += 1;
        counts.last_time = new_time;
    }

    fn on_event_processed(&mut self, _time: SimulationTime, _event: &Event) {
        self.0.borrow_mut().events += 1;
    }
}

#[test]
fn test_first_arrival_enters_step_zero_inline() {
    let mut engine = SimulationEngine::new(contended_scenario(), SimulationConfig::new()).unwrap();
    assert!(engine.step());

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.loads.len(), 1);
    assert_eq!(snapshot.loads[0].step, Some(0));
    assert!(!snapshot.loads[0].held_tags.is_empty());
    // next move attempt plus next arrival
    assert_eq!(engine.queued_events(), 2);
}

#[test]
fn test_invariants_hold_throughout_a_long_run() {
    let config = SimulationConfig::new().with_seed(42).with_max_events(3_000);
    let mut engine = SimulationEngine::new(contended_scenario(), config).unwrap();
    let mut last_step: HashMap<LoadId, Option<usize>> = HashMap::new();

    while engine.step() {
        if let Err(e) = engine.model().verify() {
            panic!("invariant broken at t={}: {}", engine.current_time(), e);
        }
        for (load, position) in engine.model().progress().iter() {
            if let Some(previous) = last_step.insert(load, position.step) {
                assert!(position.step >= previous, "load {} moved backwards", load);
            }
        }
    }

    assert_eq!(engine.events_processed(), 3_000);
    let stats = engine.stats();
    assert!(stats.exited > 0);
    assert!(stats.failed_attempts > 0);
    assert!(stats.retries_scheduled > 0);
    assert_eq!(stats.live_loads() as usize, engine.model().live_loads());
}

#[test]
fn test_same_seed_same_run() {
    let config = SimulationConfig::new().with_seed(7).with_max_time(300.0);
    let mut a = SimulationEngine::new(contended_scenario(), config.clone()).unwrap();
    let mut b = SimulationEngine::new(contended_scenario(), config).unwrap();

    assert_eq!(a.run(), b.run());
    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.snapshot(), b.snapshot());
    assert_ne!(a.run_id(), b.run_id());
}

#[test]
fn test_max_time_stops_before_later_events() {
    let config = SimulationConfig::new().with_seed(1).with_max_time(40.0);
    let mut engine = SimulationEngine::new(contended_scenario(), config).unwrap();
    let end = engine.run();
    assert!(end <= 40.0);
    assert!(engine.has_pending_events());
    assert!(!engine.step());
}

#[test]
fn test_run_until_moves_clock() {
    let mut engine = SimulationEngine::new(contended_scenario(), SimulationConfig::new()).unwrap();
    let t = engine.run_until(25.0);
    assert_eq!(t, 25.0);
    assert!(engine.stats().arrived > 0);
}

#[test]
fn test_observers_see_every_event() {
    let counts = Rc::new(RefCell::new(Counts::default()));
    let config = SimulationConfig::new().with_max_events(200);
    let mut engine = SimulationEngine::new(contended_scenario(), config).unwrap();
    engine.add_observer(Box::new(CountingObserver(Rc::clone(&counts))));
    engine.run();

    let counts = counts.borrow();
    assert_eq!(counts.events, 200);
    assert!(counts.advances > 0);
    assert_eq!(counts.last_time, engine.current_time());
}

#[test]
fn test_unsatisfiable_step_reports_blocked_loads() {
    let scenario = Scenario::new()
        .with_procedure(Procedure::new(vec![step(vec![needs(&[0], 2)], 1.0)]))
        .with_resources((0..2).map(Resource::numbered))
        .with_inter_arrival(DurationDistribution::Constant(10.0));
    let config = SimulationConfig::new()
        .with_max_time(100.0)
        .with_blocked_threshold(25.0);
    let mut engine = SimulationEngine::new(scenario, config).unwrap();
    engine.run();

    assert_eq!(engine.current_time(), 100.0);
    assert_eq!(engine.stats().arrived, 11);
    assert_eq!(engine.stats().acquisitions, 0);
    // arrivals at 0..=70 have waited at least 25
    let blocked = engine.blocked_loads();
    assert_eq!(blocked.len(), 8);
    assert!(blocked.iter().all(|b| b.waited >= 25.0));
}

#[test]
fn test_hosted_admission_without_arrival_process() {
    let scenario = Scenario::new()
        .with_procedure(Procedure::new(vec![step(vec![needs(&[0], 1)], 3.0)]))
        .with_resources((0..1).map(Resource::numbered));
    let mut engine = SimulationEngine::without_arrivals(scenario, SimulationConfig::new()).unwrap();

    let first = engine.admit(0).unwrap();
    let second = engine.admit(0).unwrap();
    assert_eq!(engine.queued_events(), 1);

    // first exits at t=3, which wakes second; second exits at t=6
    assert_eq!(engine.run(), 6.0);
    assert!(engine.model().position(first).is_none());
    assert!(engine.model().position(second).is_none());
    assert_eq!(engine.stats().exited, 2);
    assert_eq!(engine.stats().retries_scheduled, 1);
    assert!(engine.snapshot().loads.is_empty());
}

#[test]
fn test_execute_now_dispatches_inline() {
    let scenario = Scenario::new()
        .with_procedure(Procedure::new(vec![step(vec![needs(&[0], 1)], 3.0)]))
        .with_resources((0..1).map(Resource::numbered));
    let mut engine = SimulationEngine::without_arrivals(scenario, SimulationConfig::new()).unwrap();

    engine.execute_now(Event::Arrival);
    assert_eq!(engine.stats().arrived, 1);
    assert_eq!(engine.events_processed(), 1);
    assert_eq!(engine.model().ledger().occupied_count(), 1);
}
