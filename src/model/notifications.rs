//! Toast notification queue.
//!
//! The queue itself is plain data. Auto-dismiss timers live in the
//! controller, which owns the runtime handles.

use std::time::Duration;
use chrono::{DateTime, Utc};

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn default_duration(self) -> Duration {
        match self {
            Severity::Success => Duration::from_millis(4000),
            Severity::Error => Duration::from_millis(6000),
            Severity::Warning => Duration::from_millis(5000),
            Severity::Info => Duration::from_millis(4000),
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Severity::Success => "Success!",
            Severity::Error => "Error!",
            Severity::Warning => "Warning!",
            Severity::Info => "Info",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single toast
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Zero means the toast stays until dismissed.
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast, filling in the severity's default title and duration.
    pub fn enqueue(
        &mut self,
        severity: Severity,
        title: Option<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);

        self.entries.push(Notification {
            id,
            severity,
            title: title.unwrap_or_else(|| severity.default_title().to_string()),
            message: message.into(),
            duration: duration.unwrap_or_else(|| severity.default_duration()),
            created_at: Utc::now(),
        });
        id
    }

    /// Returns whether an entry was removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display order: creation time descending, later ids first on ties.
    pub fn newest_first(&self) -> Vec<Notification> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        sorted
    }
}
