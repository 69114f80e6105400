//! Node lifecycle facade
//!
//! [`NodeManager`] is what the API layer talks to. It wires the listener
//! supervisor, the health evaluator and the node store together and owns the
//! persistence that follows each operation.
//!
//! Start, stop and health evaluation of the same node all take the
//! node-identity lock, so a health check never observes a node halfway through
//! a transition. The node lock is always taken before the address lock.

use crate::core::health::{
    HealthEvaluator, HealthMonitor, HealthReport, MonitorHandle, MonitorSettings,
    evaluator::DEFAULT_PROBE_TIMEOUT,
};
use crate::core::listener::{ListenerSettings, ListenerSupervisor};
use crate::core::locks::LockRegistry;
use crate::core::node::{HealthStatus, Node, NodeId, NodeStatus};
use crate::core::probe::{Probe, TcpProbe};
use crate::services::notification::NotificationSink;
use crate::storage::NodeStore;
use crate::utils::error::{Result, WardenError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runtime settings for the lifecycle core
#[derive(Debug, Clone)]
pub struct ManagerSettings {
    pub listener: ListenerSettings,
    pub monitor: MonitorSettings,
    pub probe_timeout: Duration,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            listener: ListenerSettings::default(),
            monitor: MonitorSettings::default(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Start, stop and health-check nodes
pub struct NodeManager {
    store: Arc<dyn NodeStore>,
    supervisor: ListenerSupervisor,
    evaluator: Arc<HealthEvaluator>,
    node_locks: LockRegistry,
    monitor_settings: MonitorSettings,
}

impl NodeManager {
    /// Create a manager probing over TCP
    pub fn new(
        settings: ManagerSettings,
        store: Arc<dyn NodeStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_probe(settings, store, sink, Arc::new(TcpProbe))
    }

    /// Create a manager with a custom probe
    pub fn with_probe(
        settings: ManagerSettings,
        store: Arc<dyn NodeStore>,
        sink: Arc<dyn NotificationSink>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        let node_locks = LockRegistry::new("node");
        let evaluator = Arc::new(HealthEvaluator::new(
            probe,
            Arc::clone(&store),
            sink,
            node_locks.clone(),
            settings.probe_timeout,
        ));

        Self {
            store,
            supervisor: ListenerSupervisor::new(settings.listener),
            evaluator,
            node_locks,
            monitor_settings: settings.monitor,
        }
    }

    /// Start the node's listener and mark it `Running`
    ///
    /// If the status cannot be persisted the listener is stopped again so the
    /// store and the supervisor never disagree.
    pub async fn start_node(&self, node: &Node) -> Result<Node> {
        validate(node)?;
        let _guard = self.node_locks.acquire(node.id.lock_key()).await;

        self.supervisor.start(node).await?;

        match self
            .persist(node.id, |current| current.status = NodeStatus::Running)
            .await
        {
            Ok(updated) => {
                info!(node_id = %node.id, name = %node.name, "Node started successfully");
                Ok(updated)
            }
            Err(e) => {
                warn!(node_id = %node.id, error = %e, "Failed to update node status, rolling back");
                if let Err(stop_err) = self.supervisor.stop(node).await {
                    warn!(node_id = %node.id, error = %stop_err, "Rollback stop failed");
                }
                Err(e)
            }
        }
    }

    /// Stop the node's listener and mark it `Stopped` and `Unhealthy`
    ///
    /// A `ShutdownFailed` outcome still persists the stopped state, since the
    /// listener is deregistered either way, and is then returned to the caller.
    /// When persisting fails as well, the store error is returned and the
    /// shutdown failure is logged.
    pub async fn stop_node(&self, node: &Node) -> Result<Node> {
        validate(node)?;
        let _guard = self.node_locks.acquire(node.id.lock_key()).await;

        let outcome = match self.supervisor.stop(node).await {
            Err(e @ WardenError::NotRunning(_)) => return Err(e),
            other => other,
        };

        let persisted = self
            .persist(node.id, |current| {
                current.status = NodeStatus::Stopped;
                current.health = HealthStatus::Unhealthy;
                current.last_checked = Utc::now();
            })
            .await;

        let updated = match persisted {
            Ok(updated) => updated,
            Err(e) => {
                // Only one error can be returned; keep the drain failure in the log.
                if let Err(shutdown_err) = &outcome {
                    warn!(node_id = %node.id, error = %shutdown_err, "Listener did not drain cleanly");
                }
                return Err(e);
            }
        };

        outcome.map(|_| {
            info!(node_id = %node.id, name = %node.name, "Node stopped successfully");
            updated
        })
    }

    /// Probe the node now, persist and broadcast the result
    pub async fn check_health(&self, node: &Node) -> Result<HealthReport> {
        validate(node)?;
        self.evaluator.evaluate(node).await
    }

    /// Stop every listener; used at process teardown
    pub async fn stop_all(&self) -> usize {
        info!("Stopping all node servers");
        self.supervisor.stop_all().await
    }

    /// Build a monitor sharing this manager's evaluator and store
    pub fn monitor(&self) -> HealthMonitor {
        HealthMonitor::new(
            Arc::clone(&self.evaluator),
            Arc::clone(&self.store),
            self.monitor_settings.clone(),
        )
    }

    /// Start the background monitor loop
    pub fn spawn_monitor(&self, cancel: CancellationToken) -> MonitorHandle {
        info!("Starting health monitoring service");
        self.monitor().spawn(cancel)
    }

    pub fn supervisor(&self) -> &ListenerSupervisor {
        &self.supervisor
    }

    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    pub fn is_running(&self, id: NodeId) -> bool {
        self.supervisor.is_running(id)
    }

    async fn persist(&self, id: NodeId, apply: impl FnOnce(&mut Node)) -> Result<Node> {
        let mut current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| WardenError::not_found(format!("node {}", id)))?;
        apply(&mut current);
        self.store.save(&current).await?;
        Ok(current)
    }
}

fn validate(node: &Node) -> Result<()> {
    if node.name.trim().is_empty() {
        return Err(WardenError::validation("name is required"));
    }
    Ok(())
}
