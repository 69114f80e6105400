//! # nodewarden
//!
//! Lifecycle supervisor and health monitor for user-registered network nodes.
//!
//! ## Features
//!
//! - **Listener Supervision**: Start and stop one HTTP listener per node, with
//!   address exclusivity across nodes
//! - **Keyed Locking**: Per-node and per-address mutual exclusion that does not
//!   grow without bound
//! - **Health Checks**: Bounded TCP reachability probes, persisted and broadcast
//! - **Background Monitoring**: Periodic re-evaluation of every running node with
//!   capped concurrency and clean cancellation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nodewarden::{
//!     BroadcastNotifier, ManagerSettings, MemoryNodeStore, Node, NodeAddress, NodeManager,
//! };
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let node = Node::new(1, "edge-fra", NodeAddress::parse("127.0.0.1", 9101)?)?;
//!     let store = Arc::new(MemoryNodeStore::with_nodes([node.clone()]));
//!     let notifier = Arc::new(BroadcastNotifier::default());
//!     let manager = NodeManager::new(ManagerSettings::default(), store, notifier.clone());
//!
//!     manager.start_node(&node).await?;
//!     let report = manager.check_health(&node).await?;
//!     println!("{} is {}", node.name, report.health);
//!
//!     let monitor = manager.spawn_monitor(CancellationToken::new());
//!     monitor.shutdown().await;
//!     manager.stop_all().await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{Config, ConfigSource};
pub use utils::error::{ErrorCategory, Result, WardenError};

pub use core::health::{HealthEvent, HealthMonitor, HealthReport, MonitorHandle, MonitorSettings};
pub use core::listener::{ListenerSettings, ListenerSupervisor};
pub use core::locks::{KeyGuard, LockRegistry};
pub use core::node::{HealthStatus, Node, NodeAddress, NodeId, NodeStatus};
pub use core::probe::{Probe, ProbeOutcome, TcpProbe};
pub use core::{ManagerSettings, NodeManager};
pub use services::{BroadcastNotifier, NotificationSink};
pub use storage::{MemoryNodeStore, NodeStore};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
