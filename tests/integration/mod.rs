//! Integration tests for nodewarden
//!
//! These tests drive the public API against real loopback sockets.

pub mod config_tests;
pub mod error_handling_tests;
pub mod lifecycle_tests;
pub mod monitor_tests;
