//! The failure taxonomy from spec §7.
//!
//! The teacher crate never reaches for `thiserror`/`anyhow` anywhere in its
//! ~16k lines; it expresses failure with plain enums, `Option`, and the
//! occasional panic for conditions that indicate a bug rather than a
//! reportable outcome. This follows the same approach.

use std::fmt;

use crate::fingerprint::Fingerprint;

/// A failure raised while checking a model.
///
/// [`CheckError::InvariantViolated`] is not really a failure of the checker —
/// it is the non-local control-flow signal described in spec §7, caught
/// exactly once at the top of the BFS loop in [`crate::engine::Engine::run`].
/// The other two variants are genuine engine-side defects or resource limits
/// and propagate out of `run` as `Err`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckError {
    /// A newly admitted state failed `satisfy_invariant`. Carries the
    /// fingerprint of the violating state so the BFS loop can reconstruct a
    /// trace ending there.
    InvariantViolated { fingerprint: Fingerprint },

    /// Trace reconstruction could not find a recorded predecessor for
    /// `fingerprint`. This is an Internal Consistency Failure (spec §7): a
    /// bug in the engine, never something a model author can trigger.
    BrokenPredecessorChain { fingerprint: Fingerprint },

    /// The Seen-Set grew past [`crate::config::RunConfig::max_states`], the
    /// ambient defensive backstop described in SPEC_FULL.md §10.3. Distinct
    /// from constraint rejection: the user's `satisfy_constraint` is the
    /// intended way to bound exploration, this is a safety net for when it
    /// is missing or wrong.
    StateSpaceExhausted { limit: usize },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::InvariantViolated { fingerprint } => {
                write!(f, "invariant violated at state {fingerprint:016x}")
            }
            CheckError::BrokenPredecessorChain { fingerprint } => write!(
                f,
                "no recorded predecessor for admitted state {fingerprint:016x} (engine defect)"
            ),
            CheckError::StateSpaceExhausted { limit } => {
                write!(f, "seen-set exceeded configured limit of {limit} states")
            }
        }
    }
}

impl std::error::Error for CheckError {}
