//! The BFS model-checking loop (spec §4.2).

use std::collections::VecDeque;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::CheckError;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::model::{Model, NO_PREDECESSOR};
use crate::seen_set::SeenSet;
use crate::stats::{Completion, Stats, StatsSnapshot};

/// The outcome of a completed [`Engine::run`] call. A violation is a
/// successful, reported run, not a failure of the checker — only an
/// [`CheckError::BrokenPredecessorChain`] or
/// [`CheckError::StateSpaceExhausted`] propagates as an `Err` from `run`
/// itself (SPEC_FULL.md §10.2).
#[derive(Debug)]
pub enum RunOutcome<M: Model> {
    /// Every reachable state (within the constraint) satisfied the
    /// invariant.
    Completed,
    /// A reachable state violated the invariant; carries the shortest-path
    /// trace from an initial state to it (spec §4.4).
    ViolationFound(Trace<M>),
}

/// `s_0, s_1, ..., s_k` with `s_0` an initial state and `s_k` the state that
/// triggered the outcome, reconstructed by walking engine-owned predecessor
/// metadata (spec §4.4, §9).
#[derive(Debug)]
pub struct Trace<M>(pub Vec<M>);

impl<M: Model> Trace<M> {
    pub fn states(&self) -> &[M] {
        &self.0
    }

    /// Number of transitions in the trace (one less than the state count).
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Generates every state reachable from a set of initial states and
/// verifies that all of them satisfy the invariant.
///
/// Owns the Seen-Set, Frontier, and Stats (spec §2); all three are mutated
/// exclusively by the thread that calls [`Engine::run`] (spec §5). The
/// predecessor map (`sources`) is the engine-owned equivalent of the
/// source's `prev_hash` state field — see spec §9's Open Question and
/// SPEC_FULL.md §10.2 for why it lives here instead of inside `M`.
pub struct Engine<M: Model> {
    seen: SeenSet<M>,
    frontier: VecDeque<Fingerprint>,
    sources: HashMap<Fingerprint, Option<Fingerprint>>,
    stats: Arc<Stats>,
    completion: Arc<Completion>,
    current_parent: Fingerprint,
    config: RunConfig,
}

impl<M: Model> Engine<M> {
    pub fn new(config: RunConfig) -> Self {
        Self {
            seen: SeenSet::new(),
            frontier: VecDeque::new(),
            sources: HashMap::new(),
            stats: Arc::new(Stats::new()),
            completion: Arc::new(Completion::new()),
            current_parent: NO_PREDECESSOR,
            config,
        }
    }

    /// A cloneable, thread-safe handle onto this run's counters, for a
    /// [`crate::report::StatsReporter`] to poll concurrently (spec §4.6,
    /// §5).
    pub fn stats_handle(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }

    /// A cloneable handle onto this run's completion signal, so a reporter
    /// thread knows when to stop (spec §5).
    pub fn completion_handle(&self) -> Arc<Completion> {
        Arc::clone(&self.completion)
    }

    pub fn get_stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Performs the BFS (spec §4.2):
    ///
    /// 1. Admits every initial state with `prev_hash = 0`.
    /// 2. While the Frontier is non-empty: pops a state, runs `generate` on
    ///    a working copy, and admits every successor it emits via `either`.
    /// 3. Stops and returns the trace on the first invariant violation.
    /// 4. Otherwise exhausts the Frontier and reports completion.
    pub fn run(&mut self, initial_states: Vec<M>) -> Result<RunOutcome<M>, CheckError> {
        log::info!(
            "Starting model check. initial_states={}",
            initial_states.len()
        );

        self.current_parent = NO_PREDECESSOR;
        for state in initial_states {
            if let Err(err) = self.on_new_state(state) {
                return self.finish(err);
            }
        }

        while let Some(fp) = self.frontier.pop_front() {
            let mut work = self
                .seen
                .get(fp)
                .cloned()
                .expect("every fingerprint on the Frontier was inserted into the Seen-Set first");
            self.current_parent = fp;

            if let Err(err) = work.generate(self) {
                return self.finish(err);
            }
        }

        log::info!("Model checking finished. {}", self.get_stats());
        self.completion.signal();
        Ok(RunOutcome::Completed)
    }

    fn finish(&self, err: CheckError) -> Result<RunOutcome<M>, CheckError> {
        self.completion.signal();
        match err {
            CheckError::InvariantViolated { fingerprint } => {
                let trace = self.reconstruct_trace(fingerprint)?;
                log::info!("Violated invariant. trace_len={}", trace.len());
                Ok(RunOutcome::ViolationFound(trace))
            }
            other => Err(other),
        }
    }

    /// Admission (spec §4.2, "on_new_state"): increments `generated`,
    /// inserts into the Seen-Set if new, increments `unique`, checks the
    /// invariant, checks the constraint, and pushes onto the Frontier.
    ///
    /// Called both for initial states (from [`Engine::run`]) and for every
    /// candidate successor (from [`crate::model::either`]).
    pub(crate) fn on_new_state(&mut self, state: M) -> Result<(), CheckError> {
        self.stats.record_generated();

        let fp = fingerprint(&state);
        let parent = self.current_parent;

        if !self.seen.insert_if_absent(fp, state.clone()) {
            log::trace!("duplicate state. fingerprint={fp:016x}");
            return Ok(());
        }
        self.sources.insert(
            fp,
            if parent == NO_PREDECESSOR {
                None
            } else {
                Some(parent)
            },
        );
        self.stats.record_unique(self.seen.len());
        log::debug!("admitted state. fingerprint={fp:016x} seen_size={}", self.seen.len());

        if let Some(max_states) = self.config.max_states {
            if self.seen.len() > max_states {
                return Err(CheckError::StateSpaceExhausted { limit: max_states });
            }
        }

        if !state.satisfy_invariant() {
            return Err(CheckError::InvariantViolated { fingerprint: fp });
        }

        if !state.satisfy_constraint() {
            log::trace!("state outside constraint, not enqueued. fingerprint={fp:016x}");
            return Ok(());
        }

        self.frontier.push_back(fp);
        Ok(())
    }

    /// Walks `prev_hash` (here: the `sources` map) backward from `end` to an
    /// initial state, then reverses to discovery order (spec §4.4).
    fn reconstruct_trace(&self, end: Fingerprint) -> Result<Trace<M>, CheckError> {
        let mut chain = vec![end];
        let mut cursor = end;
        loop {
            match self.sources.get(&cursor) {
                Some(Some(parent)) => {
                    chain.push(*parent);
                    cursor = *parent;
                }
                Some(None) => break,
                None => return Err(CheckError::BrokenPredecessorChain { fingerprint: cursor }),
            }
        }
        chain.reverse();

        let states = chain
            .into_iter()
            .map(|fp| {
                self.seen
                    .get(fp)
                    .cloned()
                    .ok_or(CheckError::BrokenPredecessorChain { fingerprint: fp })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Trace(states))
    }
}
