//! Run statistics (spec §4.6) and the synchronization boundary a concurrent
//! observer must read them through (spec §5).
//!
//! The engine thread is the sole writer; a reporting thread, if one is
//! spawned, is a reader. Relaxed atomics are sufficient for the counters
//! themselves (no ordering is promised beyond "monotonically
//! non-decreasing", per spec §5), but the completion signal uses a
//! `parking_lot` `Mutex`/`Condvar` pair so the reporter can sleep instead of
//! busy-polling, mirroring the wake-up pattern `job_market.rs` used for
//! shutting down worker threads in the teacher crate.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// The two monotonic counters plus the current Seen-Set size (spec §3, §4.6).
#[derive(Default)]
pub struct Stats {
    generated: AtomicUsize,
    unique: AtomicUsize,
    seen_size: AtomicUsize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unique(&self, seen_size: usize) {
        self.unique.fetch_add(1, Ordering::Relaxed);
        self.seen_size.store(seen_size, Ordering::Relaxed);
    }

    /// A read-only snapshot, safe to call from any thread.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            unique: self.unique.load(Ordering::Relaxed),
            seen_size: self.seen_size.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time read of [`Stats`]. This is `get_stats()` from spec §4.6.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatsSnapshot {
    pub generated: usize,
    pub unique: usize,
    pub seen_size: usize,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated: {} unique: {} hash table size: {}",
            self.generated, self.unique, self.seen_size
        )
    }
}

/// The boolean flag (spec §5) that tells an observer thread the run is over,
/// plus the wake-up needed so it isn't still asleep when `run` returns.
#[derive(Default)]
pub struct Completion {
    done: Mutex<bool>,
    woken: Condvar,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals completion and wakes any thread parked in [`Completion::wait_for`].
    pub fn signal(&self) {
        *self.done.lock() = true;
        self.woken.notify_all();
    }

    pub fn is_done(&self) -> bool {
        *self.done.lock()
    }

    /// Sleeps up to `interval`, waking early if [`Completion::signal`] fires.
    /// Returns whether the run had completed by the time this returned.
    pub fn wait_for(&self, interval: Duration) -> bool {
        let mut done = self.done.lock();
        if !*done {
            self.woken.wait_for(&mut done, interval);
        }
        *done
    }
}
