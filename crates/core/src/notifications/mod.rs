//! User-facing notifications (toasts) raised by the wizard.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Trait for surfacing notifications to the user.
///
/// `notify()` must not block; delivery is best-effort.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str);
}

/// No-op implementation for hosts that don't show notifications.
#[derive(Clone, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _kind: NotificationKind, _title: &str, _message: &str) {}
}

/// Mock notifier for testing - collects notifications.
#[derive(Clone, Default)]
pub struct MockNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    /// Notifications of one kind, in order.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.notifications.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.lock().unwrap().is_empty()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        self.notifications.lock().unwrap().push(Notification {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_notifier_does_not_panic() {
        NoOpNotifier.notify(NotificationKind::Error, "Error", "Something broke");
    }

    #[test]
    fn test_mock_notifier_collects() {
        let notifier = MockNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(NotificationKind::Warning, "Heads up", "No suggestions");
        notifier.notify(NotificationKind::Success, "Done", "Goal created");
        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.of_kind(NotificationKind::Success)[0].title, "Done");

        notifier.clear();
        assert!(notifier.is_empty());
    }
}
