//! Transient toast queue with deadline-based auto-dismissal.

use chrono::{DateTime, Utc};

use exam_core::model::{ExamSettings, Notification, NotificationId, Severity};

/// Holds the currently-visible toasts for one session.
///
/// Deadlines are timestamps, not scheduled callbacks: expiry is applied by
/// `sweep` (called opportunistically on each command) and filtered out of
/// `active` reads, so timeout expiry and manual dismissal share one removal
/// path and dismissal is idempotent.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    settings: ExamSettings,
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    /// Creates an empty queue using the settings' per-severity delays.
    #[must_use]
    pub fn new(settings: ExamSettings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a toast and returns its id.
    ///
    /// The auto-dismiss deadline is `now` plus the configured delay for the
    /// given severity.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NotificationId {
        let id = NotificationId::new(self.next_id);
        self.next_id += 1;
        let expires_at = now + self.settings.dismiss_delay(severity);
        self.entries
            .push(Notification::new(id, message, severity, now, expires_at));
        id
    }

    /// Removes a toast immediately. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.entries.iter().position(|n| n.id() == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every toast whose deadline has passed. Returns how many were
    /// removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| n.is_active(now));
        before - self.entries.len()
    }

    /// Iterates over toasts still visible at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |n| n.is_active(now))
    }

    /// Number of entries held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards every toast, e.g. on session reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
