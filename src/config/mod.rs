//! Configuration management for the warden
//!
//! This module handles loading, validation, and management of all warden configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::ManagerSettings;
use crate::core::node::Node;
use crate::utils::error::{Result, WardenError};
use std::path::Path;
use tracing::{debug, info};

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was absent; defaults plus environment overrides
    Environment,
}

/// Main configuration struct for the warden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Warden configuration
    pub warden: WardenConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WardenError::Config(format!("Failed to read config file: {}", e)))?;

        let mut warden: WardenConfig = serde_yaml::from_str(&content)
            .map_err(|e| WardenError::Config(format!("Failed to parse config: {}", e)))?;
        warden.apply_env_overrides()?;

        let config = Self { warden };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to the environment
    ///
    /// Only a missing file selects the fallback. A file that exists but cannot
    /// be read, parsed or validated is an error.
    pub async fn from_file_or_env<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();
        let exists = tokio::fs::try_exists(path).await.map_err(|e| {
            WardenError::Config(format!("Failed to access config file {:?}: {}", path, e))
        })?;

        if exists {
            Ok((Self::from_file(path).await?, ConfigSource::File))
        } else {
            Ok((Self::from_env()?, ConfigSource::Environment))
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            warden: WardenConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.warden.lifecycle
    }

    pub fn monitor(&self) -> &MonitorConfig {
        &self.warden.monitor
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.warden.logging
    }

    /// Seed nodes declared in the configuration
    pub fn nodes(&self) -> &[NodeSeedConfig] {
        &self.warden.nodes
    }

    pub fn manager_settings(&self) -> ManagerSettings {
        self.warden.manager_settings()
    }

    /// Build node records for every seed
    pub fn seed_nodes(&self) -> Result<Vec<Node>> {
        self.warden.nodes.iter().map(NodeSeedConfig::to_node).collect()
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.warden.validate().map_err(WardenError::Config)?;
        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.warden = self.warden.merge(other.warden);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.warden)
            .map_err(|e| WardenError::Config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.warden)
            .map_err(|e| WardenError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
