use std::sync::Mutex;

use tracing::{info, warn};

use crate::infrastructure::traits::{Notification, NotificationKind, NotificationSink};

/// Sends notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!("{}: {}", notification.title, notification.description)
            }
            NotificationKind::Error => {
                warn!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps every notification in arrival order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The notification currently on screen
    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.all().iter().filter(|n| n.kind == kind).count()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}
