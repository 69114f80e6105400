//! Node data model
//!
//! Nodes are owned by the node store; the lifecycle core only ever holds a
//! transient copy handed in by the caller for the duration of one operation.

mod address;
mod types;

pub use address::NodeAddress;
pub use types::{HealthStatus, Node, NodeId, NodeStatus};
