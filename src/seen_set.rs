//! The Seen-Set: an insert-only map from [`Fingerprint`] to a stored copy of
//! a previously admitted state (spec §3, §4.3).

use std::collections::HashMap;

use crate::fingerprint::Fingerprint;

/// Maps `Fingerprint -> State` for every state ever admitted during a run.
///
/// Values are stored by copy (`State: Clone`) so that a state popped from the
/// Frontier, or referenced while reconstructing a counterexample trace,
/// remains valid independently of whatever the BFS loop does next (spec
/// §3, "Lifecycles").
pub struct SeenSet<S> {
    states: HashMap<Fingerprint, S>,
}

impl<S> SeenSet<S> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `state` under `fingerprint` if absent. Returns `true` if the
    /// insertion happened (this is a newly discovered state), `false` if
    /// `fingerprint` was already a key.
    pub fn insert_if_absent(&mut self, fingerprint: Fingerprint, state: S) -> bool
    where
        S: Clone,
    {
        if self.states.contains_key(&fingerprint) {
            return false;
        }
        self.states.insert(fingerprint, state);
        true
    }

    /// Looks up the stored state for `fingerprint`, used while walking the
    /// predecessor chain during trace reconstruction (spec §4.4).
    pub fn get(&self, fingerprint: Fingerprint) -> Option<&S> {
        self.states.get(&fingerprint)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S> Default for SeenSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_if_absent_rejects_duplicate_keys() {
        let mut seen = SeenSet::new();
        assert!(seen.insert_if_absent(1, "a"));
        assert!(!seen.insert_if_absent(1, "b"));
        assert_eq!(seen.get(1), Some(&"a"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn get_is_none_for_unknown_fingerprint() {
        let seen: SeenSet<&str> = SeenSet::new();
        assert_eq!(seen.get(42), None);
    }
}
