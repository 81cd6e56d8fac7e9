//! Concurrent configuration broadcast with per-node fault isolation.
//!
//! Fan-out is one in-flight push per node: no push is ordered relative to
//! another, one link's failure never cancels a sibling delivery, and the
//! coordinator returns only once every push has settled. Each push is
//! bounded by a caller-supplied timeout, reported as a [`LinkError`] on
//! expiry.

use std::collections::HashMap;
use std::time::Duration;

use futures::future;
use tracing::{debug, warn};

use skein_topology::NodeId;
use skein_wire::NodeConfig;

use crate::driver::LinkDriver;
use crate::error::{Error, LinkError};
use crate::registry::{LinkAddress, NodeRegistry};

/// One node's ready-to-send payload: the encoded configuration plus the
/// resolved link address. Immutable once built, so retries re-send the
/// exact bytes of the original attempt.
#[derive(Debug, Clone)]
pub struct NodePayload {
    pub node: NodeId,
    pub address: LinkAddress,
    pub config: NodeConfig,
}

/// Resolve encoded configurations against the registry.
///
/// Fails before any delivery if a node has no registered address.
pub fn resolve_payloads(
    configs: &[(NodeId, NodeConfig)],
    registry: &NodeRegistry,
) -> Result<Vec<NodePayload>, Error> {
    configs
        .iter()
        .map(|&(node, config)| {
            Ok(NodePayload {
                node,
                address: registry.address_of(node)?.clone(),
                config,
            })
        })
        .collect()
}

/// Per-node outcome map of one broadcast.
#[derive(Debug)]
pub struct BroadcastReport {
    outcomes: HashMap<NodeId, std::result::Result<(), LinkError>>,
}

impl BroadcastReport {
    /// True when every node reported success.
    pub fn is_complete(&self) -> bool {
        self.outcomes.values().all(|outcome| outcome.is_ok())
    }

    /// The outcome recorded for one node.
    pub fn outcome(&self, node: NodeId) -> Option<&std::result::Result<(), LinkError>> {
        self.outcomes.get(&node)
    }

    /// Nodes whose push succeeded.
    pub fn delivered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(node, _)| *node)
    }

    /// Nodes whose push failed, with the failure.
    pub fn failures(&self) -> impl Iterator<Item = (NodeId, &LinkError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(node, outcome)| outcome.as_ref().err().map(|e| (*node, e)))
    }

    /// Number of nodes covered by the broadcast.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the broadcast covered no nodes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Push every payload concurrently and collect per-node outcomes.
///
/// Join-complete: the future resolves only after every push has settled,
/// success or failure. A partial failure is an expected result, not an
/// error; retry by re-broadcasting the failed subset of the same payloads.
pub async fn broadcast(
    payloads: &[NodePayload],
    driver: &dyn LinkDriver,
    per_push_timeout: Duration,
) -> BroadcastReport {
    let pushes = payloads.iter().map(|payload| async move {
        let outcome =
            match tokio::time::timeout(per_push_timeout, driver.push(&payload.address, &payload.config))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(LinkError::Timeout(per_push_timeout)),
            };
        if let Err(error) = &outcome {
            warn!(node = %payload.node, address = %payload.address, %error, "push failed");
        }
        (payload.node, outcome)
    });

    let outcomes: HashMap<_, _> = future::join_all(pushes).await.into_iter().collect();
    let report = BroadcastReport { outcomes };
    debug!(
        nodes = report.len(),
        failed = report.failures().count(),
        "broadcast settled"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    use async_trait::async_trait;

    use skein_topology::{Flap, Rod};
    use skein_wire::ConfigWord;

    use crate::registry::RadioUri;

    /// Scripted driver: per-node delay and failure injection.
    #[derive(Default)]
    struct ScriptedDriver {
        fail: Vec<NodeId>,
        delay: Duration,
        pushed: Mutex<Vec<NodeId>>,
        in_flight_peak: AtomicUsize,
        in_flight: AtomicUsize,
    }

    #[async_trait]
    impl LinkDriver for ScriptedDriver {
        async fn push(&self, address: &LinkAddress, _config: &NodeConfig) -> Result<(), LinkError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.in_flight_peak.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            // Node id is the last two characters of the address.
            let id: u8 = address.as_str()[address.as_str().len() - 2..]
                .parse()
                .unwrap();
            let node = NodeId(id);
            self.pushed.lock().unwrap().push(node);

            if self.fail.contains(&node) {
                Err(LinkError::Nack("rejected".into()))
            } else {
                Ok(())
            }
        }

        async fn set_status(&self, _address: &LinkAddress, _code: u8) -> Result<(), LinkError> {
            Ok(())
        }
    }

    fn payloads(ids: &[u8]) -> Vec<NodePayload> {
        let scheme = RadioUri::default();
        ids.iter()
            .map(|&id| NodePayload {
                node: NodeId(id),
                address: scheme.address_for(NodeId(id)),
                config: NodeConfig {
                    word: ConfigWord::pack(NodeId(id), NodeId(0), Rod::ZERO).unwrap(),
                    flap: Flap::ZERO,
                },
            })
            .collect()
    }

    #[tokio::test]
    async fn all_nodes_succeed() {
        let driver = ScriptedDriver::default();
        let report = broadcast(&payloads(&[1, 2, 3]), &driver, Duration::from_secs(1)).await;

        assert!(report.is_complete());
        assert_eq!(report.len(), 3);
        assert_eq!(report.failures().count(), 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_siblings() {
        let driver = ScriptedDriver {
            fail: vec![NodeId(3)],
            ..Default::default()
        };
        let report = broadcast(&payloads(&[1, 2, 3, 4, 5]), &driver, Duration::from_secs(1)).await;

        assert!(!report.is_complete());
        let failed: Vec<NodeId> = report.failures().map(|(node, _)| node).collect();
        assert_eq!(failed, vec![NodeId(3)]);
        assert_eq!(report.delivered().count(), 4);
        // Every node was attempted despite the failure.
        assert_eq!(driver.pushed.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn pushes_run_concurrently_not_serially() {
        let driver = ScriptedDriver {
            delay: Duration::from_millis(50),
            ..Default::default()
        };
        let start = Instant::now();
        let report = broadcast(&payloads(&[1, 2, 3, 4, 5]), &driver, Duration::from_secs(1)).await;
        let elapsed = start.elapsed();

        assert!(report.is_complete());
        // Bounded by the slowest single push, not the sum of all five.
        assert!(
            elapsed < Duration::from_millis(200),
            "broadcast took {:?}",
            elapsed
        );
        assert!(driver.in_flight_peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn slow_push_times_out_as_link_error() {
        let driver = ScriptedDriver {
            delay: Duration::from_millis(100),
            ..Default::default()
        };
        let report = broadcast(&payloads(&[1]), &driver, Duration::from_millis(10)).await;

        assert_eq!(
            report.outcome(NodeId(1)),
            Some(&Err(LinkError::Timeout(Duration::from_millis(10))))
        );
    }

    #[tokio::test]
    async fn empty_payload_set_is_trivially_complete() {
        let driver = ScriptedDriver::default();
        let report = broadcast(&[], &driver, Duration::from_secs(1)).await;

        assert!(report.is_complete());
        assert!(report.is_empty());
    }

    #[test]
    fn resolve_payloads_fails_fast_on_unregistered_node() {
        let registry = NodeRegistry::for_nodes([NodeId(1)], &RadioUri::default());
        let configs = vec![
            (
                NodeId(1),
                NodeConfig {
                    word: ConfigWord::pack(NodeId(1), NodeId(1), Rod::ZERO).unwrap(),
                    flap: Flap::ZERO,
                },
            ),
            (
                NodeId(2),
                NodeConfig {
                    word: ConfigWord::pack(NodeId(2), NodeId(1), Rod::ZERO).unwrap(),
                    flap: Flap::ZERO,
                },
            ),
        ];

        let err = resolve_payloads(&configs, &registry).unwrap_err();
        assert_eq!(err, Error::UnknownNode(NodeId(2)));
    }
}
