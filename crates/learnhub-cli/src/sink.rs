//! Terminal notification sink.

use learnhub_core::notify::{Notification, NotificationKind, NotificationSink};

/// Prints notifications to stderr so they never interleave with command
/// output on stdout.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: Notification) {
        let prefix = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Warning => "warn",
            NotificationKind::Error => "error",
        };
        eprintln!("[{}] {}", prefix, notification.message);
    }
}
