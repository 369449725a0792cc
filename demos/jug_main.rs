//! Model checks the classic DieHard capacity-jug puzzle (spec §8 scenario
//! 1): a 5-unit jug and a 3-unit jug, no markings, invariant `big != 4`.
//! `RUST_LOG` overrides the default log level, matching the teacher crate's
//! own example programs.

use explicit_check::config::RunConfig;
use explicit_check::engine::RunOutcome;
use explicit_check::models::jug::Jug;
use explicit_check::report::{spawn_stats_reporter, write_outcome};
use explicit_check::Engine;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("Model checking the DieHard jug puzzle (capacities 5 and 3, invariant big != 4).");

    let config = RunConfig::default();
    let mut engine = Engine::new(config.clone());
    let stats = engine.stats_handle();
    let reporter = spawn_stats_reporter(
        stats.clone(),
        engine.completion_handle(),
        config.report_interval,
    );

    let outcome = engine.run(vec![Jug::new()]).expect("engine-internal failure");
    write_outcome(&mut std::io::stdout(), &outcome, &stats).expect("failed writing to stdout");

    reporter.join().expect("stats-reporter thread panicked");

    if matches!(outcome, RunOutcome::ViolationFound(_)) {
        std::process::exit(1);
    }
}
