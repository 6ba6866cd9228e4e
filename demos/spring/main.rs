use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use murmuration::algorithms::particles::{
    PSOConfig, SwarmPositionInitializer, TrackingSwarmObserver, PSO,
};
use murmuration::core::{Bounds, Callbacks, CtrlCAbortSignal};
use murmuration::objectives::Penalized;
use murmuration::test_functions::SpringWeight;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Log progress (set RUST_LOG=debug to also see initialization and restarts)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The spring weight is only meaningful where all four design constraints hold, so every
    // infeasible design is pushed above 10000
    let problem = Penalized::new(SpringWeight, 1e4);

    // Wire diameter, mean coil diameter and number of active coils
    let bounds = Bounds::new(&[0.05, 0.25, 2.0], &[2.0, 1.3, 15.0])?;

    let config = PSOConfig::new(bounds)
        .with_swarm_size(40)
        .with_position_initializer(SwarmPositionInitializer::LatinHypercube)
        .with_max_iterations(1000)
        .with_max_stagnation(150)
        .with_max_restarts(2)
        .with_report_interval(100)
        .with_random_seed(0)
        .with_parameter_names(["d", "D", "N"]);

    // Create a tracker to record swarm history
    let tracker = TrackingSwarmObserver::build();

    // Run the particle swarm optimizer (Ctrl-C stops it after the current step)
    let summary = PSO::default().minimize_with(
        &problem,
        config,
        Callbacks::empty()
            .with_observer(tracker.clone())
            .with_abort_signal(CtrlCAbortSignal::new()),
    )?;
    println!("{}", summary);

    // Export the results to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())?;
    Ok(())
}
