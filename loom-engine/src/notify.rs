//! User notifications
//!
//! Components report user-facing messages through an injected [`Notifier`]
//! instead of a global toast handle. [`NoticeBus`] fans notices out to any
//! number of subscribers (the UI root subscribes once and drops the receiver
//! when it goes away).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notice channel capacity; slow subscribers lag and skip older notices
const NOTICE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// Notification port
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Broadcast notifier with explicit subscriptions
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NoticeBus {
    fn notify(&self, notice: Notice) {
        // No subscribers is fine: nobody is showing notices right now
        if self.tx.send(notice).is_err() {
            tracing::trace!("Notice dropped, no subscribers");
        }
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "Notice");
    }
}
