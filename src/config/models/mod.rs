//! Configuration data models
//!
//! This module defines all configuration structures used by the warden.

#![allow(missing_docs)]

pub mod lifecycle;
pub mod logging;
pub mod monitor;
pub mod node;
pub mod warden;

pub use lifecycle::*;
pub use logging::*;
pub use monitor::*;
pub use node::*;
pub use warden::*;

/// Default probe timeout in milliseconds
pub fn default_probe_timeout_ms() -> u64 {
    3000
}

/// Default grace period for listener shutdown in seconds
pub fn default_shutdown_timeout_secs() -> u64 {
    5
}

pub fn default_listener_workers() -> usize {
    1
}

/// Default monitor tick in seconds
pub fn default_monitor_interval_secs() -> u64 {
    10
}

pub fn default_max_concurrent_checks() -> usize {
    64
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
