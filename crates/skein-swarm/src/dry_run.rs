//! A link driver that logs instead of transmitting.
//!
//! Used to exercise a description end to end without radio hardware: every
//! push and status update is traced with the exact payload that would have
//! gone out.

use async_trait::async_trait;
use tracing::info;

use skein_link::{LinkAddress, LinkDriver, LinkError};
use skein_wire::NodeConfig;

/// Logs every delivery at info level and reports success.
#[derive(Debug, Default)]
pub struct DryRunDriver;

#[async_trait]
impl LinkDriver for DryRunDriver {
    async fn push(&self, address: &LinkAddress, config: &NodeConfig) -> Result<(), LinkError> {
        info!(
            %address,
            word = %config.word,
            frequency = config.flap.frequency,
            amplitude = config.flap.amplitude,
            phase = config.flap.phase,
            "dry-run push"
        );
        Ok(())
    }

    async fn set_status(&self, address: &LinkAddress, code: u8) -> Result<(), LinkError> {
        info!(%address, code, "dry-run status");
        Ok(())
    }
}
