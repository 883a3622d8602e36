//! Transient on-screen notifications with automatic expiry

use std::time::{Duration, Instant};

/// Error notifications stay up this long unless dismissed
pub const ERROR_TIMEOUT: Duration = Duration::from_secs(5);
/// Success and info notifications are shorter
pub const SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotificationKind, ttl: Duration, now: Instant) -> Self {
        Self { text: text.into(), kind, expires_at: now + ttl }
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self::new(text, NotificationKind::Error, ERROR_TIMEOUT, now)
    }

    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self::new(text, NotificationKind::Success, SUCCESS_TIMEOUT, now)
    }

    pub fn info(text: impl Into<String>, now: Instant) -> Self {
        Self::new(text, NotificationKind::Info, SUCCESS_TIMEOUT, now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one notification; showing a new one replaces the old
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn show(&mut self, notification: Notification) {
        self.current = Some(notification);
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Drop the notification once expired. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.current.is_some()
    }
}
