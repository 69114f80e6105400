//! Notification sinks for tests

use nodewarden::{HealthEvent, HealthStatus, NodeId, NotificationSink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Sink that keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<HealthEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HealthEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Statuses reported for one node, oldest first
    pub fn statuses_for(&self, id: u64) -> Vec<HealthStatus> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.node_id == NodeId(id))
            .map(|e| e.health_status)
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn broadcast(&self, event: HealthEvent) {
        self.events.lock().push(event);
    }
}
