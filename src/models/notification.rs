use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// User-visible outcome of a save or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
