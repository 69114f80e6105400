//! Validated node addresses

use crate::utils::error::{Result, WardenError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// IP literal plus a port in `1..=65535`
///
/// Construction always validates, so every `NodeAddress` in the system is
/// bindable syntax-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAddress", into = "RawAddress")]
pub struct NodeAddress {
    ip: IpAddr,
    port: u16,
}

impl NodeAddress {
    /// Create an address from an already parsed IP
    pub fn new(ip: IpAddr, port: u16) -> Result<Self> {
        if port == 0 {
            return Err(WardenError::validation("port must be between 1 and 65535"));
        }
        Ok(Self { ip, port })
    }

    /// Parse an address from user input
    pub fn parse(ip: &str, port: u32) -> Result<Self> {
        let ip = ip.trim();
        if ip.is_empty() {
            return Err(WardenError::validation("IP address is required"));
        }
        let ip: IpAddr = ip
            .parse()
            .map_err(|_| WardenError::validation("invalid IP address format"))?;
        let port = u16::try_from(port)
            .map_err(|_| WardenError::validation("port must be between 1 and 65535"))?;
        Self::new(ip, port)
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// Key used for address-scoped locking
    pub fn lock_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.socket_addr().fmt(f)
    }
}

impl From<NodeAddress> for SocketAddr {
    fn from(address: NodeAddress) -> Self {
        address.socket_addr()
    }
}

#[derive(Serialize, Deserialize)]
struct RawAddress {
    ip: String,
    port: u32,
}

impl TryFrom<RawAddress> for NodeAddress {
    type Error = WardenError;

    fn try_from(raw: RawAddress) -> Result<Self> {
        Self::parse(&raw.ip, raw.port)
    }
}

impl From<NodeAddress> for RawAddress {
    fn from(address: NodeAddress) -> Self {
        Self {
            ip: address.ip.to_string(),
            port: u32::from(address.port),
        }
    }
}
