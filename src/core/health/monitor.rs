//! Background health monitoring loop
//!
//! On every tick the monitor lists running nodes and hands each one to the
//! evaluator on its own task. The loop never waits for evaluations; a
//! semaphore caps how many run at once and nodes that find no free slot are
//! left for a later tick.

use super::evaluator::HealthEvaluator;
use crate::core::node::NodeStatus;
use crate::storage::NodeStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Interval between ticks
    pub interval: Duration,
    /// Upper bound on evaluations in flight
    pub max_concurrent_checks: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_concurrent_checks: 64,
        }
    }
}

/// Periodic driver for [`HealthEvaluator`]
pub struct HealthMonitor {
    evaluator: Arc<HealthEvaluator>,
    store: Arc<dyn NodeStore>,
    settings: MonitorSettings,
    permits: Arc<Semaphore>,
}

impl HealthMonitor {
    pub fn new(
        evaluator: Arc<HealthEvaluator>,
        store: Arc<dyn NodeStore>,
        settings: MonitorSettings,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(settings.max_concurrent_checks.max(1)));
        Self {
            evaluator,
            store,
            settings,
            permits,
        }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Evaluations currently running
    pub fn in_flight(&self) -> usize {
        self.settings.max_concurrent_checks.max(1) - self.permits.available_permits()
    }

    /// Run the loop on a new task until `cancel` fires
    pub fn spawn(self, cancel: CancellationToken) -> MonitorHandle {
        let token = cancel.clone();
        let task = tokio::spawn(async move { self.run(token).await });
        MonitorHandle { cancel, task }
    }

    /// Run the loop until `cancel` fires
    ///
    /// Cancellation is observed between ticks. Evaluations already spawned are
    /// left to finish on their own.
    pub async fn run(&self, cancel: CancellationToken) {
        let period = self.settings.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = period.as_millis() as u64,
            max_concurrent_checks = self.settings.max_concurrent_checks,
            "Health monitoring service started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Health monitoring service shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_tick().await;
                }
            }
        }
    }

    /// One pass over the running nodes; returns how many checks were scheduled
    pub async fn run_tick(&self) -> usize {
        debug!("Performing health checks for all running nodes");

        let nodes = match self.store.find_by_status(NodeStatus::Running).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(error = %e, "Failed to list running nodes");
                return 0;
            }
        };

        let total = nodes.len();
        let mut scheduled = 0;
        for node in nodes {
            let permit = match Arc::clone(&self.permits).try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!(
                        deferred = total - scheduled,
                        "Health check capacity exhausted, deferring to next tick"
                    );
                    break;
                }
            };

            let evaluator = Arc::clone(&self.evaluator);
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = evaluator.evaluate(&node).await {
                    warn!(node_id = %node.id, name = %node.name, error = %e, "Health check error for node");
                }
            });
            scheduled += 1;
        }

        scheduled
    }
}

/// Handle to a spawned [`HealthMonitor`]
#[derive(Debug)]
pub struct MonitorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Health monitor task ended abnormally");
        }
    }
}
