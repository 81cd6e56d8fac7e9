//! Skein Swarm Topology
//!
//! Rooted parent-pointer tree over a fleet of physically linked aerial
//! vehicles, with per-node rigid offsets (rods) and oscillation parameters
//! (flaps), and runtime re-rooting by algebraic path reversal.
//!
//! # Invariants
//!
//! Exactly one node is self-parenting (the leader), every parent chain
//! reaches it, and each node's rod/flap values are relative to its current
//! parent edge. Re-rooting preserves all of these: the parent chain between
//! the new and old leader reverses, rods negate, and flap amplitudes flip
//! sign along the reversed path.
//!
//! # Ownership
//!
//! A [`Topology`] is exclusively owned by one topology session. All
//! mutation goes through `&mut self`, which serialises re-roots and flag
//! toggles; concurrent readers during a broadcast see an already-encoded
//! snapshot instead of the live store.

mod error;
mod reroot;
mod store;
mod types;

pub use error::{Error, Result};
pub use store::Topology;
pub use types::{Flap, NodeId, Rod, StatusCategory};
