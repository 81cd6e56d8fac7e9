//! The swarm session: exclusive owner of one topology.
//!
//! All mutation (re-rooting, flag toggles) goes through `&mut self`, so a
//! session serialises writers by construction. Delivery works on encoded
//! snapshots: the payload set built by [`SwarmSession::sync`] is immutable,
//! and retries re-send those exact payloads without touching the store.
//!
//! Status signals are explicit. Nothing in the store updates a vehicle's
//! visual code as a hidden side effect; the session performs every status
//! push as its own visible step.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use skein_link::{
    broadcast, resolve_payloads, visual_code, BroadcastReport, LinkDriver, LinkError, NodePayload,
    NodeRegistry,
};
use skein_topology::{NodeId, StatusCategory, Topology};

use crate::config::SwarmDescription;
use crate::error::Result;

/// Default bound on a single link push.
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// One live swarm session over a topology, a registry, and a link driver.
pub struct SwarmSession {
    topology: Topology,
    registry: NodeRegistry,
    driver: Arc<dyn LinkDriver>,
    push_timeout: Duration,
    /// Payload set of the most recent sync, kept for targeted retries.
    last_payloads: Vec<NodePayload>,
}

impl SwarmSession {
    /// Create a session over an already-validated topology.
    pub fn new(
        topology: Topology,
        registry: NodeRegistry,
        driver: Arc<dyn LinkDriver>,
        push_timeout: Duration,
    ) -> Self {
        Self {
            topology,
            registry,
            driver,
            push_timeout,
            last_payloads: Vec::new(),
        }
    }

    /// Create a session from a static description.
    pub fn from_description(
        description: &SwarmDescription,
        driver: Arc<dyn LinkDriver>,
        push_timeout: Duration,
    ) -> Result<Self> {
        let topology = description.to_topology()?;
        let registry = NodeRegistry::for_nodes(topology.nodes(), &description.radio.to_uri());
        Ok(Self::new(topology, registry, driver, push_timeout))
    }

    /// Read access to the owned topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Encode the current topology and push it to every node.
    pub async fn sync(&mut self) -> Result<BroadcastReport> {
        let configs = skein_wire::encode_all(&self.topology)?;
        self.last_payloads = resolve_payloads(&configs, &self.registry)?;

        let report = broadcast(&self.last_payloads, self.driver.as_ref(), self.push_timeout).await;
        info!(
            nodes = report.len(),
            failed = report.failures().count(),
            "configuration sync settled"
        );
        Ok(report)
    }

    /// Re-push the nodes that failed in `report`, re-using the payloads of
    /// the sync that produced it. No re-encoding, no topology access.
    pub async fn retry(&self, report: &BroadcastReport) -> BroadcastReport {
        let failed: Vec<NodePayload> = self
            .last_payloads
            .iter()
            .filter(|p| matches!(report.outcome(p.node), Some(Err(_))))
            .cloned()
            .collect();
        broadcast(&failed, self.driver.as_ref(), self.push_timeout).await
    }

    /// Make `node` the leader: reverse the parent chain, push the updated
    /// configuration to the whole swarm, then push every node's new status
    /// code.
    pub async fn set_leader(&mut self, node: NodeId) -> Result<BroadcastReport> {
        self.topology.reroot(node)?;
        let report = self.sync().await?;
        self.push_all_statuses().await?;
        Ok(report)
    }

    /// Toggle `node`'s root-split flag and explicitly push its new status
    /// code. Returns the resulting category so the caller observes the
    /// status change it caused.
    pub async fn split_root(&mut self, node: NodeId) -> Result<StatusCategory> {
        let split = self.topology.toggle_root_split(node)?;
        let status = self.topology.status_of(node)?;
        info!(node = %node, split, %status, "root-split toggled");

        self.push_status(node, status).await?;
        Ok(status)
    }

    /// Set or clear `node`'s actuation-disable flag. Store-local: nothing
    /// is transmitted.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.topology.set_disabled(node, disabled)?;
        Ok(())
    }

    /// Current status categories, sorted by node id.
    pub fn statuses(&self) -> Result<Vec<(NodeId, StatusCategory)>> {
        let mut ids: Vec<NodeId> = self.topology.nodes().collect();
        ids.sort();
        ids.into_iter()
            .map(|node| Ok((node, self.topology.status_of(node)?)))
            .collect()
    }

    /// Push one node's status code, bounded by the push timeout.
    async fn push_status(&self, node: NodeId, status: StatusCategory) -> Result<()> {
        let address = self.registry.address_of(node)?;
        let push = self.driver.set_status(address, visual_code(status));
        match tokio::time::timeout(self.push_timeout, push).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(LinkError::Timeout(self.push_timeout).into()),
        }
    }

    /// Push every node's status code; individual failures are logged and
    /// do not block the rest.
    async fn push_all_statuses(&self) -> Result<()> {
        for (node, status) in self.statuses()? {
            if let Err(error) = self.push_status(node, status).await {
                warn!(node = %node, %error, "status push failed");
            }
        }
        Ok(())
    }
}
