// src/models/mod.rs

//! Domain models for the watcher.
//!
//! Configuration, the persisted run state, and the push notification value
//! passed from the transition engine to the notifier.

mod config;
mod notification;
mod state;

// Re-export all public types
pub use config::{Config, FetchConfig, Messages, MonitorConfig, NotifierConfig};
pub use notification::{Notification, NotificationKind, Priority, ViewAction};
pub use state::{State, Status};
