//! Notification sink port.
//!
//! User-facing success/warning/error banners are surfaced through this
//! capability. The core only emits notifications; rendering belongs to the
//! embedding UI.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Capability for surfacing notifications to the user.
///
/// Implementations must not block and must not fail; a notification that
/// cannot be delivered is dropped.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// A sink that discards every notification.
///
/// Suitable for headless embedding and as a test default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
    fn notify(&self, _notification: Notification) {}
}
