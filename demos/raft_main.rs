//! Model checks the Raft-style log-replication model (spec §8 scenario 3):
//! three nodes, `globalCurrentTerm <= 3`, each log length `<= 2`, invariant
//! "no committed entry is rollback-able". Runs both the guarded variant
//! (expected to complete cleanly) and the unguarded variant (expected to
//! reproduce the SERVER-22136-style rollback).

use explicit_check::config::RunConfig;
use explicit_check::engine::RunOutcome;
use explicit_check::models::raft::{RaftLog, RaftLogUnguarded};
use explicit_check::report::write_outcome;
use explicit_check::Engine;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = RunConfig::default().with_max_states(50_000);

    println!("Model checking the guarded Raft log model (RollbackCommitted gated).");
    let mut guarded = Engine::new(config.clone());
    let guarded_stats = guarded.stats_handle();
    let guarded_outcome = guarded
        .run(vec![RaftLog::new()])
        .expect("engine-internal failure");
    write_outcome(&mut std::io::stdout(), &guarded_outcome, &guarded_stats)
        .expect("failed writing to stdout");

    println!();
    println!("Model checking the unguarded Raft log model (RollbackCommitted ungated).");
    let mut unguarded = Engine::new(config);
    let unguarded_stats = unguarded.stats_handle();
    let unguarded_outcome = unguarded
        .run(vec![RaftLogUnguarded::new()])
        .expect("engine-internal failure");
    write_outcome(&mut std::io::stdout(), &unguarded_outcome, &unguarded_stats)
        .expect("failed writing to stdout");

    if matches!(guarded_outcome, RunOutcome::ViolationFound(_)) {
        std::process::exit(1);
    }
}
