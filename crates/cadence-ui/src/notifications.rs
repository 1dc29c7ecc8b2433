// Centralized notification/toast system for user-facing status feedback.
// One notification is active at a time; the rest queue behind it and are
// promoted on tick after the active one expires.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Notification priority levels (higher = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Get the icon for this notification level
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

/// A single notification: a short title plus an optional longer description
/// (e.g. the message of a failed remote call).
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub level: NotificationLevel,
    pub duration: Duration,
    pub shown_at: Option<Instant>,
}

impl Notification {
    fn new(title: impl Into<String>, level: NotificationLevel, secs: u64) -> Self {
        Self {
            title: title.into(),
            description: None,
            level,
            duration: Duration::from_secs(secs),
            shown_at: None,
        }
    }

    /// Create an info notification (default 3 second duration)
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(title, NotificationLevel::Info, 3)
    }

    /// Create a success notification (default 3 second duration)
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, NotificationLevel::Success, 3)
    }

    /// Create a warning notification (default 4 second duration)
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(title, NotificationLevel::Warning, 4)
    }

    /// Create an error notification (default 5 second duration)
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, NotificationLevel::Error, 5)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a custom duration for this notification
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    fn expired(&self) -> bool {
        self.shown_at
            .map(|shown| shown.elapsed() >= self.duration)
            .unwrap_or(false)
    }
}

/// FIFO queue with a single active notification.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: VecDeque<Notification>,
    active: Option<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    /// Expire the active notification and promote the next one. Call once
    /// per frame/scheduling tick.
    pub fn tick(&mut self) {
        if self.active.as_ref().is_some_and(|n| n.expired()) {
            self.active = None;
        }
        if self.active.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.shown_at = Some(Instant::now());
                self.active = Some(next);
            }
        }
    }

    pub fn active(&self) -> Option<&Notification> {
        self.active.as_ref()
    }

    /// Drop the active notification immediately (user dismissed it).
    pub fn dismiss(&mut self) {
        self.active = None;
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }
}

/// Clonable handle for pushing notifications from async tasks (archive
/// failures, export errors) without threading the center through them.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Arc<Mutex<NotificationCenter>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, notification: Notification) {
        self.inner.lock().push(notification);
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut NotificationCenter) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
