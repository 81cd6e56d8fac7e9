//! Skein Swarm Session
//!
//! Ties the topology store, wire encoder, and link layer together into one
//! owned session per swarm: load a static description, keep the topology
//! consistent through re-roots and flag toggles, and deliver configuration
//! to the fleet with per-node fault isolation.

mod config;
mod dry_run;
mod error;
mod session;

pub use config::{LinkSpec, RadioSpec, SwarmDescription};
pub use dry_run::DryRunDriver;
pub use error::{Error, Result};
pub use session::{SwarmSession, DEFAULT_PUSH_TIMEOUT};
