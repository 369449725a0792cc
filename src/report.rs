//! The stdout surface (spec §6) and the concurrent Stats Reporter
//! collaborator (spec §2, §5).

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::engine::{RunOutcome, Trace};
use crate::model::Model;
use crate::stats::{Completion, Stats};

/// Writes the exact lines spec §6 specifies for a completed run, win or
/// lose. Mirrors the teacher crate's `WriteReporter` in shape (an explicit
/// `impl Write` sink rather than hardcoding stdout) but follows this
/// engine's line format rather than stateright's own.
pub fn write_outcome<W: Write, M: Model>(
    w: &mut W,
    outcome: &RunOutcome<M>,
    stats: &Stats,
) -> io::Result<()> {
    match outcome {
        RunOutcome::ViolationFound(trace) => write_violation(w, trace),
        RunOutcome::Completed => {
            writeln!(w, "Model checking finished.")?;
            write_stats(w, stats)
        }
    }
}

fn write_violation<W: Write, M: Model>(w: &mut W, trace: &Trace<M>) -> io::Result<()> {
    writeln!(w, "Violated invariant.")?;
    for (i, state) in trace.states().iter().enumerate() {
        writeln!(w, "State: {i}")?;
        writeln!(w, "{}", state.display())?;
        writeln!(w)?;
    }
    Ok(())
}

/// Prints the final stats line: `generated: <G> unique: <U> hash table
/// size: <S>`.
pub fn write_stats<W: Write>(w: &mut W, stats: &Stats) -> io::Result<()> {
    writeln!(w, "{}", stats.snapshot())
}

/// Spawns the concurrent observer described in spec §5: periodically prints
/// `get_stats()` until the run signals completion, then exits so it can be
/// joined.
///
/// Reads `stats` and `completion` only through the synchronization boundary
/// those types already provide (atomics / `Mutex`+`Condvar`); this thread
/// never touches the engine's Seen-Set or Frontier directly.
pub fn spawn_stats_reporter(
    stats: Arc<Stats>,
    completion: Arc<Completion>,
    interval: Duration,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stats-reporter".to_owned())
        .spawn(move || {
            loop {
                let done = completion.wait_for(interval);
                log::debug!("observer tick. {}", stats.snapshot());
                println!("{}", stats.snapshot());
                if done {
                    return;
                }
            }
        })
        .expect("failed to spawn stats-reporter thread")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::Trace;
    use crate::model::test_support::FixedPoint;

    #[test]
    fn violation_output_matches_stdout_surface() {
        let trace = Trace(vec![FixedPoint(0), FixedPoint(1)]);
        let mut buf = Vec::new();
        write_violation(&mut buf, &trace).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            "Violated invariant.\nState: 0\nFixedPoint(0)\n\nState: 1\nFixedPoint(1)\n\n"
        );
    }

    #[test]
    fn completion_output_matches_stdout_surface() {
        let outcome: RunOutcome<FixedPoint> = RunOutcome::Completed;
        let stats = Stats::new();
        stats.record_generated();
        stats.record_unique(1);
        let mut buf = Vec::new();
        write_outcome(&mut buf, &outcome, &stats).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Model checking finished.\ngenerated: 1 unique: 1 hash table size: 1\n"
        );
    }

    #[test]
    fn reporter_stops_after_completion_is_signaled() {
        let stats = Arc::new(Stats::new());
        let completion = Arc::new(Completion::new());
        let handle = spawn_stats_reporter(
            Arc::clone(&stats),
            Arc::clone(&completion),
            Duration::from_millis(10),
        );
        completion.signal();
        handle.join().expect("reporter thread should exit promptly");
    }
}
