//! Top-level warden configuration

#![allow(missing_docs)]

use super::*;
use crate::core::ManagerSettings;
use crate::utils::error::{Result, WardenError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

pub const ENV_PROBE_TIMEOUT_MS: &str = "NODEWARDEN_PROBE_TIMEOUT_MS";
pub const ENV_SHUTDOWN_TIMEOUT_SECS: &str = "NODEWARDEN_SHUTDOWN_TIMEOUT_SECS";
pub const ENV_MONITOR_INTERVAL_SECS: &str = "NODEWARDEN_MONITOR_INTERVAL_SECS";
pub const ENV_MAX_CONCURRENT_CHECKS: &str = "NODEWARDEN_MAX_CONCURRENT_CHECKS";
pub const ENV_LOG_LEVEL: &str = "NODEWARDEN_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "NODEWARDEN_LOG_JSON";

/// Main warden configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WardenConfig {
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub nodes: Vec<NodeSeedConfig>,
}

impl WardenConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `NODEWARDEN_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_override(&lookup, ENV_PROBE_TIMEOUT_MS)? {
            self.lifecycle.probe_timeout_ms = ms;
        }
        if let Some(secs) = parse_override(&lookup, ENV_SHUTDOWN_TIMEOUT_SECS)? {
            self.lifecycle.shutdown_timeout_secs = secs;
        }
        if let Some(secs) = parse_override(&lookup, ENV_MONITOR_INTERVAL_SECS)? {
            self.monitor.interval_secs = secs;
        }
        if let Some(max) = parse_override(&lookup, ENV_MAX_CONCURRENT_CHECKS)? {
            self.monitor.max_concurrent_checks = max;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(json) = parse_override(&lookup, ENV_LOG_JSON)? {
            self.logging.json = json;
        }
        Ok(())
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.lifecycle = self.lifecycle.merge(other.lifecycle);
        self.monitor = self.monitor.merge(other.monitor);
        self.logging = self.logging.merge(other.logging);

        // Seeds with the same id are replaced by other's
        let mut seeds: HashMap<u64, NodeSeedConfig> =
            self.nodes.into_iter().map(|n| (n.id, n)).collect();
        for seed in other.nodes {
            seeds.insert(seed.id, seed);
        }
        let mut nodes: Vec<_> = seeds.into_values().collect();
        nodes.sort_by_key(|n| n.id);
        self.nodes = nodes;

        self
    }

    pub fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings {
            listener: self.lifecycle.listener_settings(),
            monitor: self.monitor.settings(),
            probe_timeout: self.lifecycle.probe_timeout(),
        }
    }

    pub fn get_node(&self, id: u64) -> Option<&NodeSeedConfig> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| WardenError::config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(None),
    }
}
