//! Per-node listener supervision
//!
//! The supervisor owns the table of running listeners. Starts are serialized
//! per address, so two nodes racing for the same `ip:port` see exactly one
//! winner. A stop always removes the listener record, even when the graceful
//! drain does not finish in time.

mod service;

use crate::core::locks::LockRegistry;
use crate::core::node::{Node, NodeAddress, NodeId};
use crate::utils::error::{Result, WardenError};
use actix_web::dev::ServerHandle;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::join_all;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Listener configuration
#[derive(Debug, Clone)]
pub struct ListenerSettings {
    /// Upper bound on a graceful drain
    pub shutdown_timeout: Duration,
    /// Worker threads per listener
    pub workers: usize,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(5),
            workers: 1,
        }
    }
}

struct RunningListener {
    address: NodeAddress,
    /// Distinguishes this run from a later restart of the same node
    generation: Uuid,
    handle: ServerHandle,
    task: Option<JoinHandle<()>>,
    started_at: DateTime<Utc>,
}

/// Owner of every running per-node listener
pub struct ListenerSupervisor {
    settings: ListenerSettings,
    address_locks: LockRegistry,
    running: Arc<DashMap<NodeId, RunningListener>>,
}

impl ListenerSupervisor {
    pub fn new(settings: ListenerSettings) -> Self {
        Self {
            settings,
            address_locks: LockRegistry::new("address"),
            running: Arc::new(DashMap::new()),
        }
    }

    pub fn settings(&self) -> &ListenerSettings {
        &self.settings
    }

    /// Bind a listener for `node` and register it
    ///
    /// Fails with `AddressInUse` when something already listens on the node's
    /// address, and with `AlreadyRunning` when this node already has a
    /// listener.
    pub async fn start(&self, node: &Node) -> Result<()> {
        let address = node.address;
        let _guard = self.address_locks.acquire(address.lock_key()).await;

        if self.running.contains_key(&node.id) {
            return Err(WardenError::AlreadyRunning(node.id));
        }
        ensure_address_free(&address).await?;

        let server = service::build_server(node, &self.settings)?;
        let handle = server.handle();
        let generation = Uuid::new_v4();

        // Claimed atomically so a concurrent start of the same node on another
        // address cannot overwrite this record. Registered before the server is
        // polled, so an early failure finds the record to remove.
        match self.running.entry(node.id) {
            Entry::Occupied(_) => {
                // Unpolled, so dropping it only releases the bound socket.
                drop(server);
                return Err(WardenError::AlreadyRunning(node.id));
            }
            Entry::Vacant(slot) => {
                slot.insert(RunningListener {
                    address,
                    generation,
                    handle,
                    task: None,
                    started_at: Utc::now(),
                });
            }
        }

        let running = Arc::clone(&self.running);
        let node_id = node.id;
        let task = tokio::spawn(async move {
            let result = server.await;
            let deregistered = running
                .remove_if(&node_id, |_, listener| listener.generation == generation)
                .is_some();

            match result {
                Ok(()) => debug!(node_id = %node_id, %address, "Node server exited"),
                Err(e) => error!(
                    node_id = %node_id,
                    %address,
                    error = %e,
                    deregistered,
                    "Node server stopped with error"
                ),
            }
        });

        if let Some(mut listener) = self.running.get_mut(&node.id) {
            if listener.generation == generation {
                listener.task = Some(task);
            }
        }

        info!(node_id = %node.id, name = %node.name, %address, "Starting node server");
        Ok(())
    }

    /// Gracefully stop the listener of `node`
    ///
    /// The record is removed before draining starts; a drain that errors or
    /// exceeds the timeout is reported as `ShutdownFailed` but leaves the
    /// node stopped as far as the supervisor is concerned.
    pub async fn stop(&self, node: &Node) -> Result<()> {
        let (node_id, listener) = self
            .running
            .remove(&node.id)
            .ok_or(WardenError::NotRunning(node.id))?;

        let _guard = self.address_locks.acquire(listener.address.lock_key()).await;
        info!(node_id = %node_id, address = %listener.address, "Stopping node server");
        self.shutdown(node_id, listener).await
    }

    /// Stop every listener; used at process teardown
    ///
    /// Listeners drain concurrently. Failures are logged and do not prevent
    /// the remaining listeners from being stopped. Returns how many stopped
    /// cleanly.
    pub async fn stop_all(&self) -> usize {
        let ids: Vec<NodeId> = self.running.iter().map(|entry| *entry.key()).collect();

        let stops = ids
            .into_iter()
            .filter_map(|id| self.running.remove(&id))
            .map(|(node_id, listener)| async move {
                let address = listener.address;
                let _guard = self.address_locks.acquire(address.lock_key()).await;

                match self.shutdown(node_id, listener).await {
                    Ok(()) => {
                        info!(node_id = %node_id, %address, "Server stopped successfully");
                        true
                    }
                    Err(e) => {
                        warn!(node_id = %node_id, %address, error = %e, "Failed to shutdown server");
                        false
                    }
                }
            });

        join_all(stops).await.into_iter().filter(|stopped| *stopped).count()
    }

    pub fn is_running(&self, id: NodeId) -> bool {
        self.running.contains_key(&id)
    }

    /// Address the node's listener is bound to, if running
    pub fn running_address(&self, id: NodeId) -> Option<NodeAddress> {
        self.running.get(&id).map(|listener| listener.address)
    }

    /// When the node's listener was started, if running
    pub fn started_at(&self, id: NodeId) -> Option<DateTime<Utc>> {
        self.running.get(&id).map(|listener| listener.started_at)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn running_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.running.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    #[cfg(test)]
    pub(crate) fn server_handle(&self, id: NodeId) -> Option<ServerHandle> {
        self.running.get(&id).map(|listener| listener.handle.clone())
    }

    async fn shutdown(&self, node_id: NodeId, listener: RunningListener) -> Result<()> {
        let RunningListener { handle, task, .. } = listener;
        let timeout = self.settings.shutdown_timeout;

        let drain = async {
            handle.stop(true).await;
            match task {
                Some(task) => task.await.map_err(|e| e.to_string()),
                None => Ok(()),
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(WardenError::shutdown_failed(node_id, reason)),
            Err(_) => {
                warn!(node_id = %node_id, "Graceful shutdown timed out, forcing stop");
                let handle = handle.clone();
                tokio::spawn(async move { handle.stop(false).await });
                Err(WardenError::shutdown_failed(
                    node_id,
                    format!("graceful shutdown exceeded {}ms", timeout.as_millis()),
                ))
            }
        }
    }
}

impl Default for ListenerSupervisor {
    fn default() -> Self {
        Self::new(ListenerSettings::default())
    }
}

/// Trial bind to check nothing else listens on `address`
async fn ensure_address_free(address: &NodeAddress) -> Result<()> {
    match TcpListener::bind(address.socket_addr()).await {
        Ok(trial) => {
            drop(trial);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            debug!(%address, error = %e, "Port check failed");
            Err(WardenError::address_in_use(address.to_string()))
        }
        Err(e) => Err(WardenError::bind(address.to_string(), e)),
    }
}
