//! The two example models used as this checker's external collaborators
//! (spec §1): a capacity-jug puzzle and a Raft-style replication model.
//! Neither is part of the core engine; both exist purely to exercise it
//! (spec §8's end-to-end scenarios) and to back the `demos/` programs.

pub mod jug;
pub mod raft;
