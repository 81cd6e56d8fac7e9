//! Node registry: logical node id to physical link address, plus the
//! visual-status code table.
//!
//! Pure lookup. The addressing scheme mirrors the radio URI layout the
//! vehicles actually use: `radio://<interface>/<channel>/<datarate>/<prefix><id>`
//! with the id rendered as two decimal digits.

use std::collections::HashMap;

use skein_topology::{NodeId, StatusCategory};

use crate::error::{Error, Result};

/// Visual code shown by the leader (red and blue).
pub const VISUAL_LEADER: u8 = 0b1011_0101;
/// Visual code shown by a split-away root (green and blue).
pub const VISUAL_ROOT_SPLIT: u8 = 0b1010_1011;
/// Visual code shown by a follower (all off).
pub const VISUAL_FOLLOWER: u8 = 0b1000_0000;

/// Map a status category to its device visual code.
pub const fn visual_code(status: StatusCategory) -> u8 {
    match status {
        StatusCategory::Leader => VISUAL_LEADER,
        StatusCategory::RootSplit => VISUAL_ROOT_SPLIT,
        StatusCategory::Follower => VISUAL_FOLLOWER,
    }
}

/// How to reach one node's physical link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkAddress(String);

impl LinkAddress {
    /// Create from a raw address string.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Radio URI scheme configuration.
#[derive(Debug, Clone)]
pub struct RadioUri {
    /// Radio interface index.
    pub interface: u8,
    /// Radio channel.
    pub channel: u8,
    /// Datarate label.
    pub datarate: String,
    /// Address prefix shared by the whole fleet.
    pub prefix: String,
}

impl Default for RadioUri {
    fn default() -> Self {
        Self {
            interface: 0,
            channel: 80,
            datarate: "2M".to_string(),
            prefix: "E7E7E7E7".to_string(),
        }
    }
}

impl RadioUri {
    /// The full link address for one node id.
    pub fn address_for(&self, node: NodeId) -> LinkAddress {
        LinkAddress(format!(
            "radio://{}/{}/{}/{}{:02}",
            self.interface,
            self.channel,
            self.datarate,
            self.prefix,
            node.value()
        ))
    }
}

/// Maps logical node ids to link addresses.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    addresses: HashMap<NodeId, LinkAddress>,
}

impl NodeRegistry {
    /// Register addresses for a set of nodes under one URI scheme.
    pub fn for_nodes(nodes: impl IntoIterator<Item = NodeId>, scheme: &RadioUri) -> Self {
        let addresses = nodes
            .into_iter()
            .map(|node| (node, scheme.address_for(node)))
            .collect();
        Self { addresses }
    }

    /// Resolve a node's link address.
    pub fn address_of(&self, node: NodeId) -> Result<&LinkAddress> {
        self.addresses.get(&node).ok_or(Error::UnknownNode(node))
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_formats_two_digit_ids() {
        let scheme = RadioUri::default();

        assert_eq!(
            scheme.address_for(NodeId(3)).as_str(),
            "radio://0/80/2M/E7E7E7E703"
        );
        assert_eq!(
            scheme.address_for(NodeId(12)).as_str(),
            "radio://0/80/2M/E7E7E7E712"
        );
    }

    #[test]
    fn registry_resolves_registered_nodes_only() {
        let registry = NodeRegistry::for_nodes([NodeId(1), NodeId(2)], &RadioUri::default());

        assert_eq!(
            registry.address_of(NodeId(1)).unwrap().as_str(),
            "radio://0/80/2M/E7E7E7E701"
        );
        assert_eq!(
            registry.address_of(NodeId(5)),
            Err(Error::UnknownNode(NodeId(5)))
        );
    }

    #[test]
    fn visual_codes_per_status() {
        assert_eq!(visual_code(StatusCategory::Leader), 0b1011_0101);
        assert_eq!(visual_code(StatusCategory::RootSplit), 0b1010_1011);
        assert_eq!(visual_code(StatusCategory::Follower), 0b1000_0000);
    }
}
