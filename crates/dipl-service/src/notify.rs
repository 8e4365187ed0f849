//! Notifier implementations.

use parking_lot::Mutex;

use crate::ports::{Notification, Notifier};

/// Emits each notification as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::ScenarioCreated {
                scenario_id,
                title,
                recipients,
            } => tracing::info!(
                %scenario_id,
                %title,
                to = %recipients.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(","),
                "notify: scenario created"
            ),
            Notification::ScenarioResolved {
                scenario_id,
                choice_id,
                resolved_by,
                ..
            } => tracing::info!(
                %scenario_id,
                %choice_id,
                %resolved_by,
                "notify: scenario resolved"
            ),
            Notification::ScenarioExpired { scenario_id, .. } => {
                tracing::info!(%scenario_id, "notify: scenario expired")
            }
        }
    }
}

/// Keeps every notification in memory, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, in order.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    /// Drain and return the notifications sent so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}
