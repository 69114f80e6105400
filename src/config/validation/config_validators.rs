//! Validators for the warden configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Validate for WardenConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating warden configuration");

        self.lifecycle
            .validate()
            .map_err(|e| format!("Lifecycle config error: {}", e))?;
        self.monitor
            .validate()
            .map_err(|e| format!("Monitor config error: {}", e))?;
        self.logging
            .validate()
            .map_err(|e| format!("Logging config error: {}", e))?;

        let mut ids = HashSet::new();
        for seed in &self.nodes {
            if !ids.insert(seed.id) {
                return Err(format!("Node config error: Duplicate node id: {}", seed.id));
            }
            seed.validate()
                .map_err(|e| format!("Node config error: {}", e))?;
        }

        debug!("Warden configuration validation completed");
        Ok(())
    }
}

impl Validate for LifecycleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.probe_timeout_ms == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }
        if self.shutdown_timeout_secs == 0 {
            return Err("Shutdown timeout must be greater than 0".to_string());
        }
        if self.listener_workers == 0 {
            return Err("Listener worker count must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("Monitor interval must be greater than 0".to_string());
        }
        if self.max_concurrent_checks == 0 {
            return Err("Max concurrent checks must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Invalid log level '{}', expected one of: {}",
                self.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}

impl Validate for NodeSeedConfig {
    fn validate(&self) -> Result<(), String> {
        self.to_node()
            .map(|_| ())
            .map_err(|e| format!("Node {}: {}", self.id, e))
    }
}
