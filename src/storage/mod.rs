//! Node storage
//!
//! The lifecycle core reads and writes node records only through the
//! [`NodeStore`] trait. Each call is assumed atomic on its own; no cross-call
//! transaction is required.

mod memory;

pub use memory::MemoryNodeStore;

use crate::core::node::{Node, NodeId, NodeStatus};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of truth for node records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Fetch a node by primary key
    async fn find_by_id(&self, id: NodeId) -> Result<Option<Node>>;

    /// All nodes in the given administrative state
    async fn find_by_status(&self, status: NodeStatus) -> Result<Vec<Node>>;

    /// Insert or replace a node record
    async fn save(&self, node: &Node) -> Result<()>;
}
