//! Listener and probe configuration

use super::*;
use crate::core::listener::ListenerSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Upper bound on a single reachability probe
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Grace period for a listener to drain on stop
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
    /// Worker threads per node listener
    #[serde(default = "default_listener_workers")]
    pub listener_workers: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            listener_workers: default_listener_workers(),
        }
    }
}

impl LifecycleConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn listener_settings(&self) -> ListenerSettings {
        ListenerSettings {
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
            workers: self.listener_workers,
        }
    }

    /// Merge lifecycle configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.probe_timeout_ms != default_probe_timeout_ms() {
            self.probe_timeout_ms = other.probe_timeout_ms;
        }
        if other.shutdown_timeout_secs != default_shutdown_timeout_secs() {
            self.shutdown_timeout_secs = other.shutdown_timeout_secs;
        }
        if other.listener_workers != default_listener_workers() {
            self.listener_workers = other.listener_workers;
        }
        self
    }
}
