//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use nodewarden::{Node, NodeAddress};
use std::net::TcpListener;

/// Reserve a port the OS considers free right now
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// Factory for creating test nodes
pub struct NodeFactory;

impl NodeFactory {
    /// A node on loopback with a fresh port
    pub fn local(id: u64) -> Node {
        Self::on_port(id, free_port())
    }

    /// A node on loopback with a specific port
    pub fn on_port(id: u64, port: u16) -> Node {
        let address = NodeAddress::parse("127.0.0.1", u32::from(port)).expect("valid address");
        Node::new(id, format!("node-{}", id), address).expect("valid node")
    }

    /// A node owned by `owner_id` in `location`
    pub fn owned(id: u64, owner_id: u64, location: &str) -> Node {
        Self::local(id).with_owner(owner_id).with_location(location)
    }
}
