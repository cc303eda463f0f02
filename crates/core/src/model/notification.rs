use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::NotificationId;

/// Severity of a transient notification, used for styling and for picking
/// the auto-dismiss delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A transient user-facing message (toast).
///
/// Deadlines are plain data; expiry is decided by comparing `expires_at`
/// against the caller's clock, never by a scheduled callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new Notification.
    #[must_use]
    pub fn new(
        id: NotificationId,
        message: impl Into<String>,
        severity: Severity,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            severity,
            created_at,
            expires_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true while the auto-dismiss deadline has not passed.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
