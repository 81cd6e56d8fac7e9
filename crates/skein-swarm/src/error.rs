//! Error types for the swarm session layer.

use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a description or driving a session.
#[derive(Debug, Error)]
pub enum Error {
    /// Topology error
    #[error("topology error: {0}")]
    Topology(#[from] skein_topology::Error),

    /// Wire encoding error
    #[error("wire encoding error: {0}")]
    Wire(#[from] skein_wire::Error),

    /// Address resolution error
    #[error("link error: {0}")]
    Link(#[from] skein_link::Error),

    /// An explicit single-node status push failed
    #[error("status push failed: {0}")]
    StatusPush(#[from] skein_link::LinkError),

    /// Description parse error
    #[error("description parse error: {0}")]
    Description(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
