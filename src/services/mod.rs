//! Collaborators the lifecycle core talks to but does not own

pub mod notification;

pub use notification::{BroadcastNotifier, NotificationSink};
