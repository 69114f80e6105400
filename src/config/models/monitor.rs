//! Health monitor configuration

use super::*;
use crate::core::health::MonitorSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Run the background loop
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between ticks
    #[serde(default = "default_monitor_interval_secs")]
    pub interval_secs: u64,
    /// Cap on evaluations in flight across ticks
    #[serde(default = "default_max_concurrent_checks")]
    pub max_concurrent_checks: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_monitor_interval_secs(),
            max_concurrent_checks: default_max_concurrent_checks(),
        }
    }
}

impl MonitorConfig {
    pub fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            interval: Duration::from_secs(self.interval_secs),
            max_concurrent_checks: self.max_concurrent_checks,
        }
    }

    /// Merge monitor configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.interval_secs != default_monitor_interval_secs() {
            self.interval_secs = other.interval_secs;
        }
        if other.max_concurrent_checks != default_max_concurrent_checks() {
            self.max_concurrent_checks = other.max_concurrent_checks;
        }
        self
    }
}
