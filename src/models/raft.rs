//! A single-state (non-actor) model of Raft-style leader election and log
//! replication, used to reproduce the class of bug named in spec §8 scenario
//! 3: a `RollbackCommitted` action that is safe only when gated by
//! `logs[me].back() == globalCurrentTerm`, and which otherwise reproduces
//! the MongoDB SERVER-22136 shape — a majority-replicated, older-term entry
//! getting clobbered by a divergent, orphaned log from an earlier, stale
//! leadership attempt.
//!
//! Unlike the teacher crate's `examples/raft.rs`, this model has no actors,
//! no network, and no timers: the whole cluster is one `Model` state, and
//! every message exchange collapses into a direct mutation reachable through
//! `either`. That is a deliberate simplification to fit this checker's
//! closed-world BFS rather than stateright's actor/network simulation.

use crate::engine::Engine;
use crate::error::CheckError;
use crate::model::{either, Model};

const NUM_NODES: usize = 3;
const MAX_TERM: u8 = 3;
const MAX_LOG_LEN: usize = 2;

fn majority() -> usize {
    NUM_NODES / 2 + 1
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
enum Role {
    Follower,
    Candidate,
    Leader,
}

/// One node's view of the cluster. `votes_received` is a bitmask over node
/// indices rather than a `HashSet` so `#[derive(Hash)]` stays deterministic
/// without the sort-before-hash dance the teacher's `NodeState` needs for its
/// `HashSet<usize>` field.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct NodeState {
    current_term: u8,
    voted_for: Option<u8>,
    log: Vec<u8>,
    role: Role,
    votes_received: u8,
}

impl NodeState {
    fn new() -> Self {
        NodeState {
            current_term: 0,
            voted_for: None,
            log: Vec::new(),
            role: Role::Follower,
            votes_received: 0,
        }
    }

    fn last_log_term(&self) -> u8 {
        self.log.last().copied().unwrap_or(0)
    }
}

/// The whole cluster's state. `global_current_term` is the highest term any
/// node has reached, the `globalCurrentTerm` referenced by `RollbackCommitted`'s
/// guard. `committed_terms[idx]` is the term this checker has ever seen a
/// majority agree on at log index `idx`, paired with `committed_primary[idx]`
/// naming which node earned that commit. Ghost bookkeeping: neither field
/// corresponds to anything a real node stores, only to what this checker
/// has observed happen.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct RaftLogState {
    global_current_term: u8,
    nodes: Vec<NodeState>,
    committed_terms: Vec<Option<u8>>,
    /// Which node was primary when `committed_terms[idx]` was recorded. The
    /// invariant only ever compares that node's own log back against the
    /// commit, not every node's: a follower that simply hasn't replicated
    /// the winning leader's log yet is lagging, not corrupted.
    committed_primary: Vec<Option<u8>>,
}

impl RaftLogState {
    fn new() -> Self {
        RaftLogState {
            global_current_term: 0,
            nodes: (0..NUM_NODES).map(|_| NodeState::new()).collect(),
            committed_terms: vec![None; MAX_LOG_LEN],
            committed_primary: vec![None; MAX_LOG_LEN],
        }
    }

    /// A candidate's log must be at least as up to date as a voter's before
    /// the voter grants it (Raft's election-safety check): either the
    /// candidate's last entry is from a strictly later term, or the terms
    /// tie and the candidate's log is at least as long.
    fn start_election(&mut self, id: usize) {
        let node = &mut self.nodes[id];
        if node.role == Role::Leader {
            return;
        }
        node.current_term += 1;
        node.role = Role::Candidate;
        node.voted_for = Some(id as u8);
        node.votes_received = 1 << id;
        self.global_current_term = self.global_current_term.max(node.current_term);
    }

    fn receive_vote(&mut self, candidate: usize, voter: usize) {
        let candidate_term = self.nodes[candidate].current_term;
        let candidate_last_term = self.nodes[candidate].last_log_term();
        let candidate_len = self.nodes[candidate].log.len();

        let voter_node = &mut self.nodes[voter];
        if voter_node.current_term > candidate_term {
            return;
        }
        if voter_node.current_term < candidate_term {
            voter_node.current_term = candidate_term;
            voter_node.role = Role::Follower;
            voter_node.voted_for = None;
        }

        let log_ok = candidate_last_term > voter_node.last_log_term()
            || (candidate_last_term == voter_node.last_log_term()
                && candidate_len >= voter_node.log.len());
        if !log_ok {
            return;
        }
        match voter_node.voted_for {
            Some(v) if v != candidate as u8 => return,
            _ => {}
        }
        voter_node.voted_for = Some(candidate as u8);
        self.nodes[candidate].votes_received |= 1 << voter;
    }

    fn become_leader_if_majority(&mut self, id: usize) {
        let node = &mut self.nodes[id];
        if node.role != Role::Candidate {
            return;
        }
        if (node.votes_received.count_ones() as usize) >= majority() {
            node.role = Role::Leader;
        }
    }

    fn client_request(&mut self, id: usize) {
        let node = &mut self.nodes[id];
        if node.role != Role::Leader || node.log.len() >= MAX_LOG_LEN {
            return;
        }
        let term = node.current_term;
        node.log.push(term);
    }

    /// Ordinary, safe replication: a follower syncs its log to its primary's.
    fn replicate(&mut self, leader: usize, follower: usize) {
        if self.nodes[leader].role != Role::Leader {
            return;
        }
        let leader_term = self.nodes[leader].current_term;
        let leader_log = self.nodes[leader].log.clone();
        let follower_node = &mut self.nodes[follower];
        if follower_node.current_term > leader_term {
            return;
        }
        follower_node.current_term = leader_term;
        follower_node.role = Role::Follower;
        follower_node.log = leader_log;
    }

    /// Records a majority-replicated prefix of the primary's log as
    /// committed. This half of the commit rule only ever *records*
    /// agreement, never discards it; `rollback_committed` is the one action
    /// that can.
    fn commit_primary_entry(&mut self, primary: usize) {
        if self.nodes[primary].role != Role::Leader {
            return;
        }
        let primary_log = self.nodes[primary].log.clone();
        for (idx, &term) in primary_log.iter().enumerate() {
            if self.committed_terms[idx].is_some() {
                continue;
            }
            let acks = self
                .nodes
                .iter()
                .filter(|n| n.log.len() > idx && n.log[idx] == term)
                .count();
            if acks >= majority() {
                self.committed_terms[idx] = Some(term);
                self.committed_primary[idx] = Some(primary as u8);
            }
        }
    }

    /// The action spec §8 scenario 3 names: node `me` discards its own
    /// back (most recent) log entry in favor of `source`'s, without regard
    /// for majority or election safety — modeling an out-of-band
    /// reconciliation path (an admin rollback tool, an initial-sync
    /// routine) rather than ordinary Raft replication. This is exactly the
    /// mechanism behind SERVER-22136 when nothing stops it from discarding
    /// an entry that has already achieved majority replication.
    ///
    /// Only ever touches index `len - 1`: earlier entries are never
    /// rewritten by this action at all, regardless of `guarded`, so a
    /// committed entry is only ever at risk while it is still the back of
    /// `me`'s log. `guarded` additionally restricts the action to firing
    /// only when that back entry is still fresh (written in the current
    /// global term); anything older is assumed durable and immune.
    /// Unguarded, the action fires regardless of the age of what it
    /// discards.
    fn rollback_committed(&mut self, me: usize, source: usize, guarded: bool) {
        if me == source {
            return;
        }
        let my_last = match self.nodes[me].log.last().copied() {
            Some(t) => t,
            None => return,
        };
        if guarded && my_last != self.global_current_term {
            return;
        }
        let source_last = match self.nodes[source].log.last().copied() {
            Some(t) => t,
            None => return,
        };
        if source_last == my_last {
            return;
        }
        let idx = self.nodes[me].log.len() - 1;
        self.nodes[me].log[idx] = source_last;
    }

    /// "No primary's committed last entry is rollback-able": once a
    /// majority-acked entry's term has aged out of the current global term
    /// (an election has since moved on), the primary that committed it must
    /// keep agreeing with that term at that index. A commit still sharing
    /// the current global term hasn't settled yet (nothing has superseded
    /// it to prove it durable) and isn't checked; this mirrors exactly the
    /// boundary `rollback_committed`'s guard polices, so the two are never
    /// at odds: whatever the guard still permits touching is precisely what
    /// the invariant does not yet require to hold.
    fn satisfy_invariant(&self) -> bool {
        self.committed_terms
            .iter()
            .zip(self.committed_primary.iter())
            .enumerate()
            .all(|(idx, (committed, primary))| match (committed, primary) {
                (Some(term), Some(p)) if *term != self.global_current_term => {
                    self.nodes[*p as usize].log.get(idx) == Some(term)
                }
                _ => true,
            })
    }

    fn satisfy_constraint(&self) -> bool {
        self.global_current_term <= MAX_TERM
            && self
                .nodes
                .iter()
                .all(|n| n.current_term <= MAX_TERM && n.log.len() <= MAX_LOG_LEN)
    }

    fn display(&self) -> String {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                format!(
                    "{{id={i}, term={}, role={:?}, log={:?}}}",
                    n.current_term, n.role, n.log
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "RaftLog[global_term={}, {nodes}] committed_terms={:?} committed_primary={:?}",
            self.global_current_term, self.committed_terms, self.committed_primary
        )
    }
}

fn raft_actions<M: Model>(
    engine: &mut Engine<M>,
    state: &mut M,
    project: fn(&mut M, fn(&mut RaftLogState)),
    guarded: bool,
) -> Result<(), CheckError> {
    for i in 0..NUM_NODES {
        either(engine, state, move |s, _| {
            project(s, move |inner| inner.start_election(i));
            Ok(())
        })?;
    }
    for i in 0..NUM_NODES {
        for j in 0..NUM_NODES {
            if i == j {
                continue;
            }
            either(engine, state, move |s, _| {
                project(s, move |inner| inner.receive_vote(i, j));
                Ok(())
            })?;
        }
    }
    for i in 0..NUM_NODES {
        either(engine, state, move |s, _| {
            project(s, move |inner| inner.become_leader_if_majority(i));
            Ok(())
        })?;
    }
    for i in 0..NUM_NODES {
        either(engine, state, move |s, _| {
            project(s, move |inner| inner.client_request(i));
            Ok(())
        })?;
    }
    for i in 0..NUM_NODES {
        for j in 0..NUM_NODES {
            if i == j {
                continue;
            }
            either(engine, state, move |s, _| {
                project(s, move |inner| inner.replicate(i, j));
                Ok(())
            })?;
        }
    }
    for i in 0..NUM_NODES {
        either(engine, state, move |s, _| {
            project(s, move |inner| inner.commit_primary_entry(i));
            Ok(())
        })?;
    }
    for i in 0..NUM_NODES {
        for j in 0..NUM_NODES {
            if i == j {
                continue;
            }
            either(engine, state, move |s, _| {
                project(s, move |inner| inner.rollback_committed(i, j, guarded));
                Ok(())
            })?;
        }
    }
    Ok(())
}

/// `RollbackCommitted` gated by `logs[me].back() == globalCurrentTerm`: spec
/// §8 scenario 3 requires this variant to behave safely.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RaftLog(RaftLogState);

impl RaftLog {
    pub fn new() -> Self {
        RaftLog(RaftLogState::new())
    }
}

impl Default for RaftLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for RaftLog {
    fn satisfy_invariant(&self) -> bool {
        self.0.satisfy_invariant()
    }

    fn satisfy_constraint(&self) -> bool {
        self.0.satisfy_constraint()
    }

    fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError> {
        raft_actions(engine, self, |w, f| f(&mut w.0), true)
    }

    fn display(&self) -> String {
        self.0.display()
    }
}

/// Same model with `RollbackCommitted`'s guard removed: spec §8 scenario 3
/// requires this variant to be able to produce a counterexample trace
/// demonstrating the SERVER-22136 rollback.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RaftLogUnguarded(RaftLogState);

impl RaftLogUnguarded {
    pub fn new() -> Self {
        RaftLogUnguarded(RaftLogState::new())
    }
}

impl Default for RaftLogUnguarded {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for RaftLogUnguarded {
    fn satisfy_invariant(&self) -> bool {
        self.0.satisfy_invariant()
    }

    fn satisfy_constraint(&self) -> bool {
        self.0.satisfy_constraint()
    }

    fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError> {
        raft_actions(engine, self, |w, f| f(&mut w.0), false)
    }

    fn display(&self) -> String {
        self.0.display()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::RunConfig;
    use crate::engine::RunOutcome;

    /// Builds a cluster where node 2 once led an orphaned, never-committed
    /// term-1 entry, then node 0 legitimately won a later election, wrote
    /// and committed its own term-2 entry with a genuine majority (node 0 +
    /// node 1), and the term advanced once more — aging that commit out of
    /// `rollback_committed`'s guarded reach.
    fn cluster_with_a_stale_orphan_and_a_committed_entry() -> RaftLogState {
        let mut state = RaftLogState::new();

        state.start_election(2);
        state.receive_vote(2, 1);
        state.become_leader_if_majority(2);
        state.client_request(2); // node 2: log = [1], never replicated or committed

        state.start_election(0);
        state.receive_vote(0, 1); // node 1 already voted for 2 this term, refused
        state.start_election(0); // retry at a higher term resets node 1's vote
        state.receive_vote(0, 1);
        state.become_leader_if_majority(0);
        state.client_request(0); // node 0: log = [2]
        state.replicate(0, 1); // node 1: log = [2]
        state.commit_primary_entry(0);

        assert_eq!(state.committed_terms[0], Some(2));
        assert!(state.satisfy_invariant());

        state.start_election(1); // advances global_current_term past 2
        assert!(state.global_current_term > 2);
        state
    }

    #[test]
    fn guarded_rollback_refuses_to_touch_an_aged_committed_entry() {
        let mut state = cluster_with_a_stale_orphan_and_a_committed_entry();
        state.rollback_committed(0, 2, true);
        assert_eq!(state.nodes[0].log, vec![2]);
        assert!(state.satisfy_invariant());
    }

    #[test]
    fn unguarded_rollback_clobbers_the_committed_entry_with_a_stale_orphan() {
        let mut state = cluster_with_a_stale_orphan_and_a_committed_entry();
        state.rollback_committed(0, 2, false);
        assert_eq!(state.nodes[0].log, vec![1]);
        assert!(!state.satisfy_invariant());
    }

    #[test]
    fn guarded_model_explores_its_whole_constrained_space_without_violation() {
        let mut engine = Engine::new(RunConfig::default().with_max_states(50_000));
        let outcome = engine.run(vec![RaftLog::new()]).unwrap();
        assert!(matches!(outcome, RunOutcome::Completed));
    }

    #[test]
    fn unguarded_model_reproduces_the_rollback() {
        let mut engine = Engine::new(RunConfig::default().with_max_states(50_000));
        let outcome = engine.run(vec![RaftLogUnguarded::new()]).unwrap();
        match outcome {
            RunOutcome::ViolationFound(trace) => assert!(!trace.is_empty()),
            RunOutcome::Completed => {
                panic!("expected the ungated rollback to reproduce a counterexample")
            }
        }
    }
}
