//! Restock notification subscription entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// One user's request to be notified when a product restocks.
///
/// A subscription survives across restock cycles: the dispatcher flips
/// `delivered` to true when it notifies the subscriber, and the coordinator
/// flips it back to false on the next restock so long-term subscribers are
/// notified every time without resubscribing.
///
/// ## Invariants
/// - At most one *active* (`delivered == false`) subscription exists per
///   `(product_id, user_id)` pair, enforced by a partial unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockSubscription {
    /// Surrogate ledger identifier.
    pub id: Uuid,
    /// Product the subscriber wants to hear about.
    pub product_id: Uuid,
    /// Account to notify.
    pub user_id: UserId,
    /// Whether the subscriber has been notified for the current cycle.
    pub delivered: bool,
    /// When the subscription was first created.
    pub created_at: DateTime<Utc>,
}

impl RestockSubscription {
    /// Create a fresh, undelivered subscription for the given pair.
    pub fn new(product_id: Uuid, user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            delivered: false,
            created_at: Utc::now(),
        }
    }

    /// Record that the subscriber has been notified for this cycle.
    ///
    /// Only the notification dispatcher performs this transition.
    pub fn mark_delivered(&mut self) {
        self.delivered = true;
    }

    /// Reset a delivered subscription so the next restock notifies it again.
    ///
    /// Only the restock coordinator performs this transition.
    pub fn reopen(&mut self) {
        self.delivered = false;
    }

    /// Whether the given account owns this subscription.
    pub fn is_owned_by(&self, requester: &UserId) -> bool {
        self.user_id == *requester
    }
}
