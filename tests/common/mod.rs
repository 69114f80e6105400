//! Common test utilities for nodewarden
//!
//! This module provides shared test infrastructure for all tests:
//! - Node factories bound to free local ports
//! - Recording sinks for health events
//! - Custom assertions and helpers
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, sinks};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let node = fixtures::NodeFactory::local(1);
//!     let sink = sinks::RecordingSink::new();
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod sinks;

// Re-export commonly used items
pub use fixtures::{NodeFactory, free_port};
pub use sinks::RecordingSink;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

/// Poll `$cond` until it holds or `$timeout` elapses
#[macro_export]
macro_rules! wait_until {
    ($timeout:expr, $cond:expr) => {{
        let deadline = tokio::time::Instant::now() + $timeout;
        loop {
            if $cond {
                break true;
            }
            if tokio::time::Instant::now() >= deadline {
                break false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }};
}
