pub mod clipboard;
pub mod commands;
pub mod download;
pub mod notifications;
pub mod tracing_setup;
pub mod ui;

pub use notifications::{Notification, NotificationCenter, NotificationLevel, Notifier};
