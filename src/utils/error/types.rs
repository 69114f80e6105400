//! Error types for nodewarden

use crate::core::node::NodeId;
use thiserror::Error;

/// Result type alias for nodewarden
pub type Result<T> = std::result::Result<T, WardenError>;

/// Main error type for nodewarden
#[derive(Error, Debug)]
pub enum WardenError {
    /// Invalid node data (address, port, name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another listener already occupies the address
    #[error("Address {address} is already in use")]
    AddressInUse { address: String },

    /// The node identity already has a running listener
    #[error("Node {0} is already running")]
    AlreadyRunning(NodeId),

    /// No running listener is registered for the node
    #[error("No running listener found for node {0}")]
    NotRunning(NodeId),

    /// Graceful shutdown did not complete in time or errored
    #[error("Failed to shut down listener for node {node_id}: {reason}")]
    ShutdownFailed { node_id: NodeId, reason: String },

    /// Binding the listener socket failed for a reason other than contention
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Node store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
