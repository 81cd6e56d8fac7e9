//! Core value types for the swarm topology.
//!
//! A node's physical relationship to its parent is described by a rigid
//! offset (the rod) and a periodic oscillation (the flap). Both are always
//! expressed relative to the *current* parent edge direction, so reversing
//! an edge re-derives them rather than copying.

use std::ops::Neg;

/// Identifier of one physical vehicle in the swarm.
///
/// The wire format (see `skein-wire`) can only carry ids 0-15; the store
/// itself accepts any `u8` and leaves range enforcement to encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u8);

impl NodeId {
    /// Create from a raw id.
    #[inline]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for NodeId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<NodeId> for u8 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rigid 3D offset from a node to its parent.
///
/// Components are kept as `i32` in the store; the wire format constrains
/// each to a signed byte at encode time. Reversing the parent edge negates
/// the whole vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rod {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Rod {
    /// Sentinel for a root: a root has no parent offset.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new rod vector.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Neg for Rod {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl From<[i32; 3]> for Rod {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl std::fmt::Display for Rod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Periodic oscillation parameters applied relative to a node's parent.
///
/// When a parent edge reverses, an oscillation phased relative to "above"
/// becomes phased relative to "below": the amplitude changes sign while
/// frequency and phase carry through.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flap {
    /// Oscillation frequency in Hz.
    pub frequency: f32,
    /// Signed oscillation amplitude.
    pub amplitude: f32,
    /// Phase offset in radians.
    pub phase: f32,
}

impl Flap {
    /// Sentinel for a root: no oscillation against a parent that isn't there.
    pub const ZERO: Self = Self {
        frequency: 0.0,
        amplitude: 0.0,
        phase: 0.0,
    };

    /// Create new flap parameters.
    pub const fn new(frequency: f32, amplitude: f32, phase: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
        }
    }

    /// The same oscillation seen from the other end of the edge.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            frequency: self.frequency,
            amplitude: -self.amplitude,
            phase: self.phase,
        }
    }
}

impl From<(f32, f32, f32)> for Flap {
    fn from(v: (f32, f32, f32)) -> Self {
        Self::new(v.0, v.1, v.2)
    }
}

/// Desired visual-status category for one node.
///
/// The core only decides the category; mapping it to a device-specific
/// code is the registry's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// The unique self-parenting node.
    Leader,
    /// A node that declared itself logically independent of the chain.
    RootSplit,
    /// Any other node.
    Follower,
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leader => write!(f, "leader"),
            Self::RootSplit => write!(f, "root-split"),
            Self::Follower => write!(f, "follower"),
        }
    }
}
