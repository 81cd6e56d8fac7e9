//! Skein node coordinator binary
//!
//! Loads a swarm description and performs a dry-run configuration sync,
//! logging the exact payload each vehicle would receive.

use std::sync::Arc;

use skein_swarm::{DryRunDriver, SwarmDescription, SwarmSession, DEFAULT_PUSH_TIMEOUT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skein_swarm=info,skein_link=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: skein-node <description.json>")?;

    tracing::info!(%path, "loading swarm description");
    let description = SwarmDescription::from_path(&path)?;
    let mut session =
        SwarmSession::from_description(&description, Arc::new(DryRunDriver), DEFAULT_PUSH_TIMEOUT)?;

    let leader = session.topology().leader()?;
    tracing::info!(nodes = session.topology().len(), %leader, "topology validated");

    let report = session.sync().await?;
    for (node, error) in report.failures() {
        tracing::warn!(%node, %error, "node not reached");
    }
    for (node, status) in session.statuses()? {
        tracing::info!(%node, %status, "node status");
    }

    Ok(())
}
