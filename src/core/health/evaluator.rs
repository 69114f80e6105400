//! Single-node health evaluation
//!
//! Evaluations of the same node are serialized through the node-identity lock,
//! and the result is persisted and broadcast while that lock is still held, so
//! the store and observers always reflect the most recently completed probe.

use super::types::HealthReport;
use crate::core::locks::LockRegistry;
use crate::core::node::{HealthStatus, Node, NodeId};
use crate::core::probe::Probe;
use crate::services::notification::NotificationSink;
use crate::storage::NodeStore;
use crate::utils::error::{Result, WardenError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default budget for one probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Probe-and-record cycle for one node at a time
pub struct HealthEvaluator {
    probe: Arc<dyn Probe>,
    store: Arc<dyn NodeStore>,
    sink: Arc<dyn NotificationSink>,
    node_locks: LockRegistry,
    probe_timeout: Duration,
}

impl HealthEvaluator {
    pub fn new(
        probe: Arc<dyn Probe>,
        store: Arc<dyn NodeStore>,
        sink: Arc<dyn NotificationSink>,
        node_locks: LockRegistry,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            store,
            sink,
            node_locks,
            probe_timeout,
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Probe `node`, persist the outcome, and notify observers
    ///
    /// An unreachable node is an ordinary `Unhealthy` report. Only a failure to
    /// persist the result is returned as an error, and observers are notified
    /// even then.
    pub async fn evaluate(&self, node: &Node) -> Result<HealthReport> {
        let _guard = self.node_locks.acquire(node.id.lock_key()).await;

        let outcome = self.probe.probe(&node.address, self.probe_timeout).await;
        let report = HealthReport {
            node_id: node.id,
            health: outcome.health,
            checked_at: Utc::now(),
            latency_ms: outcome.latency.as_millis() as u64,
            error: outcome.reason,
        };

        match &report.error {
            Some(reason) => warn!(
                node_id = %node.id,
                name = %node.name,
                address = %node.address,
                reason = %reason,
                "Health check failed"
            ),
            None => info!(
                node_id = %node.id,
                name = %node.name,
                address = %node.address,
                latency_ms = report.latency_ms,
                "Health check successful"
            ),
        }

        let persisted = self
            .record(node.id, report.health, report.checked_at)
            .await;
        if let Err(e) = &persisted {
            warn!(node_id = %node.id, error = %e, "Failed to update health status");
        }

        self.sink.broadcast(report.event());

        persisted.map(|_| report)
    }

    async fn record(&self, id: NodeId, health: HealthStatus, checked_at: DateTime<Utc>) -> Result<()> {
        let mut current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| WardenError::not_found(format!("node {}", id)))?;

        current.health = health;
        current.last_checked = checked_at;
        self.store.save(&current).await
    }
}
