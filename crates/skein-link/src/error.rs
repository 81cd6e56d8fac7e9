//! Error types for skein-link.

use thiserror::Error;

use skein_topology::NodeId;

/// Result type for registry and broadcast-preparation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any delivery is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A node id has no registered link address.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

/// A per-node delivery failure.
///
/// Always local to one node: a `LinkError` for one link never aborts or
/// delays delivery to its siblings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    /// The push did not complete within the caller-supplied bound.
    #[error("link push timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The node's firmware rejected the configuration.
    #[error("link rejected push: {0}")]
    Nack(String),

    /// The physical link is down.
    #[error("link disconnected")]
    Disconnected,
}
