//! Skein Link Layer
//!
//! Everything between an encoded node configuration and the physical
//! per-node links: address resolution, the link push seam, and the
//! concurrent broadcast coordinator.
//!
//! # Fault isolation
//!
//! Each node is a logically distinct physical link. The broadcast
//! coordinator issues one independent push per node and reports per-node
//! outcomes; a dead link degrades exactly one entry of the report.

mod broadcast;
mod driver;
mod error;
mod registry;

pub use broadcast::{broadcast, resolve_payloads, BroadcastReport, NodePayload};
pub use driver::LinkDriver;
pub use error::{Error, LinkError, Result};
pub use registry::{
    visual_code, LinkAddress, NodeRegistry, RadioUri, VISUAL_FOLLOWER, VISUAL_LEADER,
    VISUAL_ROOT_SPLIT,
};
