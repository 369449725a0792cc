//! End-to-end coverage for the jug puzzle models, exercised through the
//! public API the way a caller outside this crate would use it.

use explicit_check::config::RunConfig;
use explicit_check::engine::RunOutcome;
use explicit_check::models::jug::{Jug, JugReachability};
use explicit_check::Engine;

#[test]
fn finds_the_four_unit_measurement() {
    let mut engine = Engine::new(RunConfig::default());
    let outcome = engine.run(vec![Jug::new()]).unwrap();
    match outcome {
        RunOutcome::ViolationFound(trace) => {
            assert_eq!(trace.states().last().unwrap().big, 4);
        }
        RunOutcome::Completed => panic!("big == 4 is reachable from (0, 0)"),
    }
}

#[test]
fn reachability_variant_explores_the_whole_space_without_violation() {
    let mut engine = Engine::new(RunConfig::default());
    let outcome = engine.run(vec![JugReachability::new()]).unwrap();
    assert!(matches!(outcome, RunOutcome::Completed));
}

#[test]
fn a_max_states_ceiling_tighter_than_the_reachable_space_is_hit() {
    use explicit_check::error::CheckError;

    let mut engine = Engine::new(RunConfig::default().with_max_states(2));
    let result = engine.run(vec![JugReachability::new()]);
    assert!(matches!(
        result,
        Err(CheckError::StateSpaceExhausted { limit: 2 })
    ));
}

#[test]
fn running_the_same_model_twice_is_idempotent() {
    let mut first = Engine::new(RunConfig::default());
    let first_outcome = first.run(vec![JugReachability::new()]).unwrap();
    let first_stats = first.get_stats();

    let mut second = Engine::new(RunConfig::default());
    let second_outcome = second.run(vec![JugReachability::new()]).unwrap();
    let second_stats = second.get_stats();

    assert!(matches!(first_outcome, RunOutcome::Completed));
    assert!(matches!(second_outcome, RunOutcome::Completed));
    assert_eq!(first_stats.generated, second_stats.generated);
    assert_eq!(first_stats.unique, second_stats.unique);
}
