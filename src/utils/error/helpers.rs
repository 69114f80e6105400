//! Helper functions for creating specific error types

use super::types::WardenError;
use crate::core::node::NodeId;

impl WardenError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn address_in_use<S: Into<String>>(address: S) -> Self {
        Self::AddressInUse {
            address: address.into(),
        }
    }

    pub fn shutdown_failed<S: Into<String>>(node_id: NodeId, reason: S) -> Self {
        Self::ShutdownFailed {
            node_id,
            reason: reason.into(),
        }
    }

    pub fn bind<S: Into<String>>(address: S, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
