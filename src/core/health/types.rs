//! Health event and report types

use crate::core::node::{HealthStatus, NodeId};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status event pushed to observers after every evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    pub node_id: NodeId,
    pub health_status: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthEvent {
    pub fn new(node_id: NodeId, health_status: HealthStatus) -> Self {
        Self {
            node_id,
            health_status,
            timestamp: Utc::now(),
        }
    }

    /// Wire representation sent to observers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of one completed evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub node_id: NodeId,
    pub health: HealthStatus,
    pub checked_at: DateTime<Utc>,
    /// Probe duration in milliseconds
    pub latency_ms: u64,
    /// Probe failure reason
    pub error: Option<String>,
}

impl HealthReport {
    pub fn event(&self) -> HealthEvent {
        HealthEvent {
            node_id: self.node_id,
            health_status: self.health,
            timestamp: self.checked_at,
        }
    }
}
