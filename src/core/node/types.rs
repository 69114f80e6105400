//! Node record types

use super::address::NodeAddress;
use crate::utils::error::{Result, WardenError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Key used for node-scoped locking
    pub fn lock_key(&self) -> String {
        format!("node:{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Administrative state, changed only by a successful start or stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    Stopped,
    Running,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::Stopped => f.write_str("Stopped"),
            NodeStatus::Running => f.write_str("Running"),
        }
    }
}

/// Observed liveness, changed only by a completed probe cycle
///
/// Independent of [`NodeStatus`]: a node may be `Running` and `Unhealthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("Healthy"),
            HealthStatus::Unhealthy => f.write_str("Unhealthy"),
        }
    }
}

/// A user-registered network endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub owner_id: u64,
    pub name: String,
    pub address: NodeAddress,
    #[serde(default)]
    pub location: Option<String>,
    pub status: NodeStatus,
    pub health: HealthStatus,
    pub last_checked: DateTime<Utc>,
}

impl Node {
    /// Create a freshly registered node: stopped, unhealthy, checked now
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, address: NodeAddress) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WardenError::validation("name is required"));
        }
        Ok(Self {
            id: id.into(),
            owner_id: 0,
            name,
            address,
            location: None,
            status: NodeStatus::Stopped,
            health: HealthStatus::Unhealthy,
            last_checked: Utc::now(),
        })
    }

    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_running(&self) -> bool {
        self.status == NodeStatus::Running
    }
}
