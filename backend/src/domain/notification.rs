//! User-visible notification entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Category of a notification, persisted as a stable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A product the user subscribed to is back in stock.
    Restock,
    /// A product's vote count crossed the administrative alert threshold.
    VoteThreshold,
}

impl NotificationKind {
    /// Stable string form used by the persistence layer.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restock => "restock",
            Self::VoteThreshold => "vote_threshold",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification delivered to a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Surrogate identifier.
    pub id: Uuid,
    /// Recipient account.
    pub user_id: UserId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Rendered message body.
    pub body: String,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a restock notification for a subscriber.
    pub fn restock(user_id: UserId, product_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind: NotificationKind::Restock,
            body: format!("{product_name} is back in stock"),
            created_at: Utc::now(),
        }
    }

    /// Build an administrative vote-threshold alert.
    pub fn vote_threshold(admin_id: UserId, product_name: &str, count: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: admin_id,
            kind: NotificationKind::VoteThreshold,
            body: format!("{product_name} has reached {count} restock votes"),
            created_at: Utc::now(),
        }
    }
}
