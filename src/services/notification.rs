//! Real-time fan-out of health events
//!
//! The health evaluator is the only producer. Delivery is best effort: an
//! observer that lags or disappears never fails the evaluation that produced
//! the event.

use crate::core::health::HealthEvent;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Default number of events buffered per observer
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 1000;

/// Destination for health-status events
pub trait NotificationSink: Send + Sync {
    /// Deliver `event` to every currently registered observer
    fn broadcast(&self, event: HealthEvent);
}

/// [`NotificationSink`] over a tokio broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<HealthEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a new observer
    pub fn subscribe(&self) -> broadcast::Receiver<HealthEvent> {
        debug!("New health event observer added");
        self.sender.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_CAPACITY)
    }
}

impl NotificationSink for BroadcastNotifier {
    fn broadcast(&self, event: HealthEvent) {
        trace!(
            node_id = %event.node_id,
            health_status = %event.health_status,
            "broadcasting health status"
        );
        if self.sender.send(event).is_err() {
            trace!("no health event observers registered");
        }
    }
}
