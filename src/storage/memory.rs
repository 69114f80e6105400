//! In-memory node store

use super::NodeStore;
use crate::core::node::{Node, NodeId, NodeStatus};
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Process-local [`NodeStore`] backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeStore {
    nodes: Arc<RwLock<BTreeMap<NodeId, Node>>>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `nodes`
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let store = Self::new();
        {
            let mut map = store.nodes.write();
            for node in nodes {
                map.insert(node.id, node);
            }
        }
        store
    }

    /// Synchronous lookup, handy outside async contexts
    pub fn get(&self, id: NodeId) -> Option<Node> {
        self.nodes.read().get(&id).cloned()
    }

    pub fn remove(&self, id: NodeId) -> Option<Node> {
        self.nodes.write().remove(&id)
    }

    pub fn all(&self) -> Vec<Node> {
        self.nodes.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn find_by_id(&self, id: NodeId) -> Result<Option<Node>> {
        Ok(self.get(id))
    }

    async fn find_by_status(&self, status: NodeStatus) -> Result<Vec<Node>> {
        Ok(self
            .nodes
            .read()
            .values()
            .filter(|node| node.status == status)
            .cloned()
            .collect())
    }

    async fn save(&self, node: &Node) -> Result<()> {
        self.nodes.write().insert(node.id, node.clone());
        Ok(())
    }
}
