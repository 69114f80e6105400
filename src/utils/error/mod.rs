//! Error handling for nodewarden
//!
//! This module defines the crate-wide error type, its helper constructors and
//! the taxonomy used to decide whether an error is the caller's problem, an
//! expected contention outcome, or something unexpected.

mod category;
mod helpers;
mod types;

// Re-export all public types
pub use category::ErrorCategory;
pub use types::{Result, WardenError};
