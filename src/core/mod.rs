//! Node lifecycle and health-monitoring core
//!
//! # Module Structure
//!
//! - `node` - Node records, identities and validated addresses
//! - `locks` - Keyed mutual exclusion
//! - `probe` - Bounded reachability checks
//! - `listener` - Per-node listener supervision
//! - `health` - Health evaluation and the background monitor
//! - `manager` - Facade exposing start/stop/check operations

pub mod health;
pub mod listener;
pub mod locks;
pub mod manager;
pub mod node;
pub mod probe;

pub use manager::{ManagerSettings, NodeManager};
