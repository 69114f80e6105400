//! Seed node configuration

use crate::core::node::{Node, NodeAddress};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// A node loaded into the store at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSeedConfig {
    pub id: u64,
    pub name: String,
    pub ip: String,
    /// Wider than `u16` so out-of-range values are reported, not truncated
    pub port: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub owner_id: u64,
    /// Start the node's listener when the daemon boots
    #[serde(default)]
    pub autostart: bool,
}

impl NodeSeedConfig {
    pub fn address(&self) -> Result<NodeAddress> {
        NodeAddress::parse(&self.ip, self.port)
    }

    pub fn to_node(&self) -> Result<Node> {
        let node = Node::new(self.id, self.name.clone(), self.address()?)?.with_owner(self.owner_id);
        Ok(match &self.location {
            Some(location) => node.with_location(location.clone()),
            None => node,
        })
    }
}
