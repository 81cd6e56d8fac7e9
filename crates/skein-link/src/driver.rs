//! The per-node link push primitive.
//!
//! The physical transport behind a push (radio framing, acknowledgement,
//! retries) lives outside this crate; implementations only need to be
//! idempotent so a failed push can be re-sent with the same payload.

use async_trait::async_trait;

use skein_wire::NodeConfig;

use crate::error::LinkError;
use crate::registry::LinkAddress;

/// One node's physical link.
#[async_trait]
pub trait LinkDriver: Send + Sync {
    /// Deliver a configuration payload to the node behind `address`.
    async fn push(&self, address: &LinkAddress, config: &NodeConfig) -> Result<(), LinkError>;

    /// Set the node's visual-status code.
    async fn set_status(&self, address: &LinkAddress, code: u8) -> Result<(), LinkError>;
}
