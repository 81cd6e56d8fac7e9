//! Re-rooting: redesignating the leader by reversing the parent chain.
//!
//! Re-rooting never moves a vehicle. The chain between the new and old
//! leader is reversed algebraically: each edge on the path flips direction,
//! and because rod and flap are expressed relative to the parent edge, the
//! reversed edge's rod negates and its flap amplitude changes sign.
//!
//! The transform is a chain of "shift and flip", not an independent
//! per-node computation: each node on the path inherits the negated rod
//! (and flipped flap) of the node that used to be its child along the path.
//! The whole rewrite is computed against pre-mutation values and committed
//! in one pass, so a failed walk leaves the topology untouched.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::store::Topology;
use crate::types::{Flap, NodeId, Rod};

/// One buffered node rewrite, computed before any mutation is applied.
struct Rewrite {
    node: NodeId,
    parent: NodeId,
    rod: Rod,
    flap: Flap,
}

impl Topology {
    /// Make `new_leader` the leader by reversing the parent chain between
    /// it and the current leader.
    ///
    /// No-op if `new_leader` already leads. Fails with
    /// [`Error::UnknownNode`] (topology unmodified) if it is not
    /// registered. O(path length), not O(tree size).
    pub fn reroot(&mut self, new_leader: NodeId) -> Result<()> {
        if !self.contains(new_leader) {
            return Err(Error::UnknownNode(new_leader));
        }

        let old_leader = self.leader()?;
        if new_leader == old_leader {
            trace!(leader = %new_leader, "reroot is a no-op");
            return Ok(());
        }

        // Read-only walk from the new leader up to the old one. Guaranteed
        // finite by the acyclicity invariant; the length guard turns a
        // corrupted chain into an error instead of a hang.
        let mut path = vec![new_leader];
        let mut current = new_leader;
        while current != old_leader {
            current = self.parent_of(current)?;
            path.push(current);
            if path.len() > self.len() {
                return Err(Error::CycleDetected(current));
            }
        }

        // Buffer the full rewrite against pre-mutation values. The new
        // leader self-loops with sentinel rod/flap; every other node on the
        // path points at its former child and inherits that child's old
        // rod negated and its old flap amplitude-flipped.
        let mut rewrites = Vec::with_capacity(path.len());
        rewrites.push(Rewrite {
            node: new_leader,
            parent: new_leader,
            rod: Rod::ZERO,
            flap: Flap::ZERO,
        });
        for pair in path.windows(2) {
            let (former_child, node) = (pair[0], pair[1]);
            rewrites.push(Rewrite {
                node,
                parent: former_child,
                rod: -self.rod_of(former_child)?,
                flap: self.flap_of(former_child)?.flipped(),
            });
        }

        for rw in rewrites {
            self.rewrite(rw.node, rw.parent, rw.rod, rw.flap);
        }

        debug!(
            old_leader = %old_leader,
            new_leader = %new_leader,
            path_len = path.len(),
            "rerooted topology"
        );
        Ok(())
    }
}
