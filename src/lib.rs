//! An explicit-state model checker for finite transition systems, in the
//! spirit of TLC: a user defines a state type, a non-deterministic successor
//! relation written as ordinary imperative code with explicit branching
//! points, a safety invariant, and a state-space constraint that bounds
//! exploration. The checker performs a breadth-first enumeration of all
//! reachable states, detects any state violating the invariant, and reports
//! a shortest-path counterexample trace.
//!
//! ```rust
//! use explicit_check::config::RunConfig;
//! use explicit_check::engine::{Engine, RunOutcome};
//! use explicit_check::error::CheckError;
//! use explicit_check::model::{either, Model};
//!
//! #[derive(Clone, Debug, Eq, PartialEq, Hash)]
//! struct Counter(u8);
//!
//! impl Model for Counter {
//!     fn satisfy_invariant(&self) -> bool {
//!         self.0 != 3
//!     }
//!
//!     fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError> {
//!         either(engine, self, |s, _| {
//!             s.0 += 1;
//!             Ok(())
//!         })
//!     }
//!
//!     fn display(&self) -> String {
//!         format!("Counter({})", self.0)
//!     }
//! }
//!
//! let mut engine = Engine::new(RunConfig::default());
//! match engine.run(vec![Counter(0)]).unwrap() {
//!     RunOutcome::ViolationFound(trace) => assert_eq!(trace.len(), 3),
//!     RunOutcome::Completed => panic!("expected a violation"),
//! }
//! ```
//!
//! See the `demos/` programs for two larger example models: a capacity-jug
//! puzzle and a Raft-style log-replication model.

pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod report;
pub mod seen_set;
pub mod stats;

pub mod models;

pub use engine::{Engine, RunOutcome, Trace};
pub use error::CheckError;
pub use fingerprint::{fingerprint, Fingerprint};
pub use model::{either, Model};
