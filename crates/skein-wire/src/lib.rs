//! Skein Wire Format
//!
//! Packs a node's tree position into a single 32-bit configuration word
//! for transmission over the per-node link, with the flap scalars carried
//! alongside as plain floats.
//!
//! # Word layout
//!
//! Total size: 32 bits
//! - bits 0-3: node id (4 bits)
//! - bits 4-7: parent id (4 bits)
//! - bits 8-15: rod.x as signed byte
//! - bits 16-23: rod.y as signed byte
//! - bits 24-31: rod.z as signed byte
//!
//! Values outside their bit width are rejected, never wrapped: a silently
//! truncated id or rod component would corrupt the adjacent field in the
//! packed word.

use thiserror::Error;

use skein_topology::{Flap, NodeId, Rod, Topology};

/// Result type for wire encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding a node configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A node or parent id does not fit the 4-bit wire range (0-15).
    #[error("id {0} exceeds the 4-bit wire range")]
    IdOutOfRange(NodeId),

    /// A rod component does not fit a signed byte.
    #[error("rod component {axis} = {value} exceeds the signed-byte range")]
    RodOutOfRange { axis: char, value: i32 },

    /// The topology lookup behind an encode failed.
    #[error(transparent)]
    Topology(#[from] skein_topology::Error),
}

const ID_MASK: u32 = 0xF;
const BYTE_MASK: u32 = 0xFF;

fn check_id(id: NodeId) -> Result<u32> {
    let raw = u32::from(id.value());
    if raw > ID_MASK {
        return Err(Error::IdOutOfRange(id));
    }
    Ok(raw)
}

fn check_component(axis: char, value: i32) -> Result<u32> {
    i8::try_from(value)
        .map(|b| u32::from(b as u8))
        .map_err(|_| Error::RodOutOfRange { axis, value })
}

/// A node's tree position packed into one 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigWord(u32);

impl ConfigWord {
    /// Pack a node id, parent id, and rod vector.
    ///
    /// Fails with [`Error::IdOutOfRange`] or [`Error::RodOutOfRange`] if
    /// any field exceeds its bit width.
    pub fn pack(node: NodeId, parent: NodeId, rod: Rod) -> Result<Self> {
        let word = check_id(node)?
            | check_id(parent)? << 4
            | check_component('x', rod.x)? << 8
            | check_component('y', rod.y)? << 16
            | check_component('z', rod.z)? << 24;
        Ok(Self(word))
    }

    /// Reinterpret a raw word received off the wire.
    pub const fn from_raw(word: u32) -> Self {
        Self(word)
    }

    /// The raw packed word.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// The node id field.
    pub const fn node(&self) -> NodeId {
        NodeId((self.0 & ID_MASK) as u8)
    }

    /// The parent id field.
    pub const fn parent(&self) -> NodeId {
        NodeId((self.0 >> 4 & ID_MASK) as u8)
    }

    /// The rod vector field.
    pub const fn rod(&self) -> Rod {
        Rod::new(
            (self.0 >> 8 & BYTE_MASK) as u8 as i8 as i32,
            (self.0 >> 16 & BYTE_MASK) as u8 as i8 as i32,
            (self.0 >> 24 & BYTE_MASK) as u8 as i8 as i32,
        )
    }
}

impl std::fmt::Display for ConfigWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The complete per-node wire payload: the packed word plus the three flap
/// scalars. Nothing else in the topology store is transmitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeConfig {
    pub word: ConfigWord,
    pub flap: Flap,
}

/// Encode one node's current configuration from the topology.
pub fn encode_node(topology: &Topology, node: NodeId) -> Result<NodeConfig> {
    let parent = topology.parent_of(node)?;
    let rod = topology.rod_of(node)?;
    let flap = topology.flap_of(node)?;
    Ok(NodeConfig {
        word: ConfigWord::pack(node, parent, rod)?,
        flap,
    })
}

/// Encode every node in the topology, sorted by id for stable ordering.
///
/// Pure and fail-fast: any out-of-range field rejects the whole batch
/// before anything is transmitted.
pub fn encode_all(topology: &Topology) -> Result<Vec<(NodeId, NodeConfig)>> {
    let mut ids: Vec<NodeId> = topology.nodes().collect();
    ids.sort();

    let mut configs = Vec::with_capacity(ids.len());
    for node in ids {
        configs.push((node, encode_node(topology, node)?));
    }
    Ok(configs)
}
