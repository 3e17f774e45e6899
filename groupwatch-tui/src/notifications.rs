//! Footer notifications.

use chrono::{DateTime, Utc};

/// Footer notifications fade after this long.
pub const NOTIFICATION_TTL_MS: i64 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERRO",
            NotificationLevel::Success => "OK",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the notification is older than `ttl_ms` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl_ms: i64) -> bool {
        (now - self.created_at).num_milliseconds() >= ttl_ms
    }
}
