//! Toast notifications with per-entry dismiss timers

use std::time::Duration;

use crate::model::{NotificationId, Severity};
use super::AppController;

impl AppController {
    /// Show a notification with the severity's default title and duration.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> NotificationId {
        self.enqueue(severity, None, message.into(), None)
    }

    pub fn notify_with_title(
        &self,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NotificationId {
        self.enqueue(severity, Some(title.into()), message.into(), None)
    }

    /// Show a notification for `duration`. A zero duration keeps it until
    /// it is dismissed.
    pub fn notify_with_duration(
        &self,
        severity: Severity,
        title: Option<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> NotificationId {
        self.enqueue(severity, title, message.into(), Some(duration))
    }

    pub fn dismiss_notification(&self, id: NotificationId) {
        if let Some(timer) = self.timers.lock().remove(&id) {
            timer.abort();
        }
        if self.model.dismiss_notification(id) {
            tracing::debug!(%id, "Notification dismissed");
        }
    }

    pub fn clear_notifications(&self) {
        for (_, timer) in self.timers.lock().drain() {
            timer.abort();
        }
        self.model.clear_notifications();
        tracing::debug!("Notifications cleared");
    }

    /// Dismiss the most recent notification, if any.
    pub fn dismiss_newest_notification(&self) {
        if let Some(newest) = self.model.notifications().first() {
            self.dismiss_notification(newest.id);
        }
    }

    fn enqueue(
        &self,
        severity: Severity,
        title: Option<String>,
        message: String,
        duration: Option<Duration>,
    ) -> NotificationId {
        let duration = duration.unwrap_or_else(|| severity.default_duration());
        let id = self.model.enqueue_notification(severity, title, message, Some(duration));
        tracing::debug!(%id, ?severity, duration_ms = duration.as_millis() as u64, "Notification shown");

        if !duration.is_zero() {
            self.arm_timer(id, duration);
        }
        id
    }

    fn arm_timer(&self, id: NotificationId, after: Duration) {
        // Held across the spawn so the task cannot remove its entry before
        // it has been inserted.
        let mut timers = self.timers.lock();
        let controller = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            controller.timers.lock().remove(&id);
            if controller.model.dismiss_notification(id) {
                tracing::trace!(%id, "Notification expired");
            }
        });
        timers.insert(id, handle.abort_handle());
    }

    #[cfg(test)]
    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.lock().len()
    }
}
