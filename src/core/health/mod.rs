//! Node health evaluation and monitoring
//!
//! # Module Structure
//!
//! - `types` - Health events and per-check reports
//! - `evaluator` - One serialized probe-and-record cycle for a node
//! - `monitor` - Background loop driving the evaluator for running nodes
//! - `tests` - Test suite for health evaluation and monitoring

pub mod evaluator;
pub mod monitor;
pub mod types;

pub use evaluator::HealthEvaluator;
pub use monitor::{HealthMonitor, MonitorHandle, MonitorSettings};
pub use types::{HealthEvent, HealthReport};
