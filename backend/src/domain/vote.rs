//! Restock vote entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// One user's recorded request that a product be restocked.
///
/// ## Invariants
/// - At most one vote exists per `(product_id, user_id)` pair; the ledger's
///   unique index is the sole concurrency guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Surrogate ledger identifier.
    pub id: Uuid,
    /// Product the vote counts towards.
    pub product_id: Uuid,
    /// Account that cast the vote.
    pub user_id: UserId,
    /// When the vote was recorded.
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a fresh vote for the given pair, stamped with the current time.
    pub fn new(product_id: Uuid, user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the given account owns this vote.
    pub fn is_owned_by(&self, requester: &UserId) -> bool {
        self.user_id == *requester
    }
}
