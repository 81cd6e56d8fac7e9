//! The authoritative in-memory topology model.
//!
//! One `Topology` owns the parent pointers and the per-node physical
//! parameters for a whole swarm session. The map is key-indexed: every
//! lookup is O(1), and a node's rod and flap entries live next to its
//! parent pointer so they can never go missing independently.
//!
//! # Invariants
//!
//! - Exactly one node is self-parenting (the leader).
//! - Following parents from any node reaches the leader; no other cycles.
//! - Every node has rod and flap entries (structural: they share the map
//!   entry with the parent pointer).
//! - Rod and flap are relative to the current parent edge direction.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Flap, NodeId, Rod, StatusCategory};

/// Everything the topology knows about one node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeEntry {
    pub(crate) parent: NodeId,
    pub(crate) rod: Rod,
    pub(crate) flap: Flap,
    pub(crate) disabled: bool,
    pub(crate) root_split: bool,
}

/// A rooted parent-pointer tree over the swarm, plus per-node physical
/// parameters and flags.
///
/// Exclusively owned by one topology session: all mutation goes through
/// `&mut self`, which serialises re-roots and flag toggles by construction.
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: HashMap<NodeId, NodeEntry>,
}

impl Topology {
    /// Build a topology from a static description: `(node, parent)` pairs
    /// plus positionally aligned rod and flap arrays.
    ///
    /// Validates the full invariant set and fails without constructing
    /// anything if the description is not a single rooted tree.
    pub fn from_links(links: &[(NodeId, NodeId)], rods: &[Rod], flaps: &[Flap]) -> Result<Self> {
        if links.len() != rods.len() || links.len() != flaps.len() {
            return Err(Error::MisalignedDescription {
                links: links.len(),
                rods: rods.len(),
                flaps: flaps.len(),
            });
        }

        let mut nodes = HashMap::with_capacity(links.len());
        for (i, &(node, parent)) in links.iter().enumerate() {
            let entry = NodeEntry {
                parent,
                rod: rods[i],
                flap: flaps[i],
                disabled: false,
                root_split: false,
            };
            if nodes.insert(node, entry).is_some() {
                return Err(Error::DuplicateNode(node));
            }
        }

        let topology = Self { nodes };
        topology.check_invariants()?;
        Ok(topology)
    }

    /// Verify the single-leader and acyclicity invariants.
    ///
    /// Cheap relative to session lifetime; run at construction and
    /// available to callers as a defensive check.
    pub fn check_invariants(&self) -> Result<()> {
        let leaders: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(node, entry)| **node == entry.parent)
            .map(|(node, _)| *node)
            .collect();
        if leaders.len() != 1 {
            return Err(Error::InvariantViolation {
                leaders: leaders.len(),
            });
        }
        let leader = leaders[0];

        // Every parent must be registered and every chain must reach the
        // leader within |nodes| steps.
        for &start in self.nodes.keys() {
            let mut current = start;
            for _ in 0..self.nodes.len() {
                if current == leader {
                    break;
                }
                current = self.parent_of(current)?;
            }
            if current != leader {
                return Err(Error::CycleDetected(start));
            }
        }
        Ok(())
    }

    /// The parent of `node`.
    pub fn parent_of(&self, node: NodeId) -> Result<NodeId> {
        self.entry(node).map(|e| e.parent)
    }

    /// The rod vector from `node` to its parent.
    pub fn rod_of(&self, node: NodeId) -> Result<Rod> {
        self.entry(node).map(|e| e.rod)
    }

    /// The flap parameters of `node` relative to its parent.
    pub fn flap_of(&self, node: NodeId) -> Result<Flap> {
        self.entry(node).map(|e| e.flap)
    }

    /// The unique self-parenting node.
    pub fn leader(&self) -> Result<NodeId> {
        let mut found = None;
        let mut leaders = 0;
        for (node, entry) in &self.nodes {
            if *node == entry.parent {
                found = Some(*node);
                leaders += 1;
            }
        }
        match (found, leaders) {
            (Some(node), 1) => Ok(node),
            _ => Err(Error::InvariantViolation { leaders }),
        }
    }

    /// Flip the root-split flag and return its new value.
    ///
    /// Does not touch parent pointers, and deliberately does not emit any
    /// status signal: propagating the new status is the caller's explicit
    /// step.
    pub fn toggle_root_split(&mut self, node: NodeId) -> Result<bool> {
        let entry = self.entry_mut(node)?;
        entry.root_split = !entry.root_split;
        Ok(entry.root_split)
    }

    /// Whether `node` has declared itself logically independent.
    pub fn is_root_split(&self, node: NodeId) -> Result<bool> {
        self.entry(node).map(|e| e.root_split)
    }

    /// Set the actuation-disable flag. Independent of topology.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.entry_mut(node)?.disabled = disabled;
        Ok(())
    }

    /// Whether `node` has actuation disabled.
    pub fn is_disabled(&self, node: NodeId) -> Result<bool> {
        self.entry(node).map(|e| e.disabled)
    }

    /// The desired visual-status category for `node`.
    ///
    /// Root-split wins over leader: a split node shows as independent even
    /// while it still holds the leader self-loop.
    pub fn status_of(&self, node: NodeId) -> Result<StatusCategory> {
        let entry = self.entry(node)?;
        if entry.root_split {
            Ok(StatusCategory::RootSplit)
        } else if entry.parent == node {
            Ok(StatusCategory::Leader)
        } else {
            Ok(StatusCategory::Follower)
        }
    }

    /// Iterate over all node ids, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes in the topology.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the topology is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` is registered.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn entry(&self, node: NodeId) -> Result<&NodeEntry> {
        self.nodes.get(&node).ok_or(Error::UnknownNode(node))
    }

    fn entry_mut(&mut self, node: NodeId) -> Result<&mut NodeEntry> {
        self.nodes.get_mut(&node).ok_or(Error::UnknownNode(node))
    }

    /// Direct parent/rod/flap rewrite for one node. Only the re-rooting
    /// engine may call this; it is responsible for re-deriving rod and flap
    /// in the same logical step as the parent change.
    pub(crate) fn rewrite(&mut self, node: NodeId, parent: NodeId, rod: Rod, flap: Flap) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.parent = parent;
            entry.rod = rod;
            entry.flap = flap;
        }
    }
}
