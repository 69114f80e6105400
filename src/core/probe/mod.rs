//! Reachability probing
//!
//! A probe decides liveness of an address with a single bounded connection
//! attempt. Every failure mode collapses into [`HealthStatus::Unhealthy`] with
//! a reason attached for logging; nothing is raised past this boundary.


use crate::core::node::{HealthStatus, NodeAddress};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::debug;

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub health: HealthStatus,
    /// Time spent on the attempt
    pub latency: Duration,
    /// Why the probe failed, if it did
    pub reason: Option<String>,
}

impl ProbeOutcome {
    pub fn healthy(latency: Duration) -> Self {
        Self {
            health: HealthStatus::Healthy,
            latency,
            reason: None,
        }
    }

    pub fn unhealthy(reason: impl Into<String>, latency: Duration) -> Self {
        Self {
            health: HealthStatus::Unhealthy,
            latency,
            reason: Some(reason.into()),
        }
    }
}

/// Liveness check against an address
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, address: &NodeAddress, timeout: Duration) -> ProbeOutcome;
}

/// TCP handshake probe
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, address: &NodeAddress, timeout: Duration) -> ProbeOutcome {
        debug!(%address, "performing health check");

        let start = Instant::now();
        match tokio::time::timeout(timeout, TcpStream::connect(address.socket_addr())).await {
            Ok(Ok(_stream)) => {
                debug!(%address, "node is responsive");
                ProbeOutcome::healthy(start.elapsed())
            }
            Ok(Err(e)) => ProbeOutcome::unhealthy(e.to_string(), start.elapsed()),
            Err(_) => ProbeOutcome::unhealthy(
                format!("connection timed out after {}ms", timeout.as_millis()),
                start.elapsed(),
            ),
        }
    }
}
