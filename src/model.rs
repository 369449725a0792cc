//! The Model Contract (spec §4.1) and the `either` Successor Emitter (spec
//! §4.5).

use std::hash::Hash;
use std::mem;

use crate::engine::Engine;
use crate::error::CheckError;
use crate::fingerprint::Fingerprint;

/// The reserved fingerprint meaning "no predecessor" (spec §3). Admitted
/// for an initial state.
pub const NO_PREDECESSOR: Fingerprint = 0;

/// The capabilities the engine requires of a user-defined state (spec
/// §4.1).
///
/// `Hash`/`Eq` supply the contract's `hash`/`equals` capabilities directly —
/// equal values hash equally by construction, which is exactly what the
/// contract demands. Per spec §9's resolved Open Question, `prev_hash` is
/// *not* a field of `Self`: it is engine-owned metadata tracked alongside
/// the Seen-Set (see [`crate::engine::Engine`]), so a logically identical
/// state reached via two different parents is stored once, not twice.
pub trait Model: Clone + Eq + Hash {
    /// True iff this state is acceptable. A `false` result halts the run
    /// with a counterexample trace ending at this state (spec §4.2).
    fn satisfy_invariant(&self) -> bool;

    /// True iff the engine should continue expanding from this state. The
    /// user's state-space bound (spec §4.1); trivially `true` by default.
    fn satisfy_constraint(&self) -> bool {
        true
    }

    /// Enumerates successor states by mutating `self` in place between
    /// calls to [`either`]. Every non-deterministic branch point is wrapped
    /// in an `either` call so the engine can intercept each candidate
    /// successor (spec §4.1, §4.5).
    fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError>
    where
        Self: Sized;

    /// A human-readable rendering, used only for reporting (spec §4.1).
    fn display(&self) -> String;
}

/// Tries one non-deterministic branch of a model's `generate`.
///
/// Takes a snapshot of `state`, runs `branch` against it, hands the mutated
/// state to `engine` as a candidate successor, then restores `state` to the
/// snapshot so the caller can try further branches from the same pre-state
/// (spec §4.5):
///
/// ```text
/// snapshot = copy(w)
/// apply_branch(&mut w)
/// engine.on_new_state(w)
/// w = snapshot
/// ```
///
/// `branch` receives `engine` too, so it may itself call `either` to model a
/// nested non-deterministic choice; because `engine` is threaded through as
/// an ordinary function argument rather than captured by a held `&mut self`
/// receiver, nested calls borrow-check without any interior mutability.
/// Each nesting level snapshots and restores only its own local pre-state,
/// so an inner branch's mutations never leak into a later, sibling outer
/// branch (spec §4.5, "Nested branches").
///
/// An `Err` returned by `branch` (a violation discovered by a nested
/// `either`) short-circuits before the candidate here is emitted: the run is
/// about to terminate, so the skipped restore is harmless (spec §7).
pub fn either<M>(
    engine: &mut Engine<M>,
    state: &mut M,
    branch: impl FnOnce(&mut M, &mut Engine<M>) -> Result<(), CheckError>,
) -> Result<(), CheckError>
where
    M: Model,
{
    let snapshot = state.clone();
    branch(state, engine)?;
    let emitted = mem::replace(state, snapshot);
    engine.on_new_state(emitted)
}
