use loadflow::{
    DurationDistribution, Procedure, Requirement, Resource, Scenario, ServiceTime, SimulationConfig,
    SimulationEngine, Step,
};

fn service() -> ServiceTime {
    ServiceTime::from_distribution(DurationDistribution::exponential(5.0))
}

fn between(low: i64, high: i64) -> impl Fn(&Resource) -> bool + Send + Sync + 'static {
    move |r| {
        let id = r.id.raw() as i64;
        id > low && id < high
    }
}

fn scenario() -> Scenario {
    Scenario::new()
        .with_procedure(Procedure::new(vec![
            Step::new(
                vec![
                    Requirement::new(between(5, i64::MAX), 2),
                    Requirement::new(between(i64::MIN, 3), 1),
                ],
                service(),
            ),
            Step::new(
                vec![
                    Requirement::new(between(7, i64::MAX), 1),
                    Requirement::new(between(2, 5), 1),
                ],
                service(),
            ),
        ]))
        .with_procedure(Procedure::new(vec![
            Step::new(
                vec![
                    Requirement::new(between(6, 8), 1),
                    Requirement::new(between(-1, 4), 1),
                ],
                service(),
            ),
            Step::new(
                vec![
                    Requirement::new(between(3, 11), 2),
                    Requirement::new(between(1, 6), 1),
                ],
                service(),
            ),
            Step::new(
                vec![
                    Requirement::new(between(-1, 3), 1),
                    Requirement::new(between(6, 11), 1),
                ],
                service(),
            ),
        ]))
        .with_resources((0..10).map(Resource::numbered))
        .with_inter_arrival(DurationDistribution::exponential(10.0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let events: u64 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(20);

    let config = SimulationConfig::new()
        .with_seed(0)
        .with_max_events(events)
        .with_blocked_threshold(60.0);
    let mut engine = SimulationEngine::new(scenario(), config)?;

    println!("Run {}", engine.run_id());
    while engine.step() {
        println!("{}", engine.snapshot());
    }

    let stats = engine.stats();
    println!(
        "arrived={} exited={} acquisitions={} failed={} retries={} stale={}",
        stats.arrived,
        stats.exited,
        stats.acquisitions,
        stats.failed_attempts,
        stats.retries_scheduled,
        stats.stale_events
    );
    for blocked in engine.blocked_loads() {
        println!(
            "load {} blocked before step {} of procedure {} for {:.1}",
            blocked.load, blocked.target_step, blocked.position.procedure, blocked.waited
        );
    }
    Ok(())
}
