//! Error types for skein-topology.

use thiserror::Error;

use crate::NodeId;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating a topology.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An operation referenced a node id that is not in the topology.
    /// Recoverable: validate the id before calling.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The single-leader invariant is broken. Fatal to the session:
    /// indicates a prior bug or an uncoordinated concurrent mutation,
    /// and must not be silently repaired.
    #[error("invariant violated: {leaders} self-parenting nodes, expected exactly 1")]
    InvariantViolation { leaders: usize },

    /// A parent chain does not terminate at the leader.
    #[error("invariant violated: parent cycle through node {0}")]
    CycleDetected(NodeId),

    /// Construction input arrays are not positionally aligned.
    #[error("description mismatch: {links} links, {rods} rods, {flaps} flap tuples")]
    MisalignedDescription {
        links: usize,
        rods: usize,
        flaps: usize,
    },

    /// The same node id appeared twice in a construction description.
    #[error("duplicate node {0} in description")]
    DuplicateNode(NodeId),
}
