//! Error classification

use super::types::WardenError;
use serde::{Deserialize, Serialize};

/// Broad class of an error, used by callers to decide how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Bad input, rejected before any lock is taken
    Validation,
    /// Expected outcome of racing operations; report, do not retry
    Contention,
    /// Listener did not drain in time; the node is stopped regardless
    Shutdown,
    /// Anything else
    Fatal,
}

impl WardenError {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            WardenError::Validation(_) => ErrorCategory::Validation,
            WardenError::AddressInUse { .. }
            | WardenError::AlreadyRunning(_)
            | WardenError::NotRunning(_) => ErrorCategory::Contention,
            WardenError::ShutdownFailed { .. } => ErrorCategory::Shutdown,
            _ => ErrorCategory::Fatal,
        }
    }

    /// Whether the system is left in a consistent state the caller can act on
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Fatal)
    }
}
