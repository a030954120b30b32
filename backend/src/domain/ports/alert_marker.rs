//! Port for the admin alert dedup marker.
//!
//! The marker's existence means "the admin has already been alerted for this
//! product's current vote surge". It expires automatically; the atomic
//! set-if-absent arbitrates concurrent threshold crossings so exactly one
//! caller wins the right to alert.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

/// Errors raised by alert marker store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertMarkerStoreError {
    /// The store is unreachable or the operation timed out.
    #[error("alert marker store unavailable: {message}")]
    Unavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl AlertMarkerStoreError {
    /// Create an unavailability error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for the per-product admin alert dedup marker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertMarkerStore: Send + Sync {
    /// Atomically write the marker if absent, with the given time-to-live.
    ///
    /// Returns `true` when this caller created the marker (and therefore
    /// owns the alert), `false` when the marker already existed.
    async fn try_set(
        &self,
        product_id: &Uuid,
        ttl: Duration,
    ) -> Result<bool, AlertMarkerStoreError>;

    /// Delete the marker so a future surge can alert again.
    ///
    /// Coordinator-only: called after a restock reset.
    async fn clear(&self, product_id: &Uuid) -> Result<(), AlertMarkerStoreError>;
}

/// Fixture store where every `try_set` wins and `clear` is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertMarkerStore;

#[async_trait]
impl AlertMarkerStore for FixtureAlertMarkerStore {
    async fn try_set(
        &self,
        _product_id: &Uuid,
        _ttl: Duration,
    ) -> Result<bool, AlertMarkerStoreError> {
        Ok(true)
    }

    async fn clear(&self, _product_id: &Uuid) -> Result<(), AlertMarkerStoreError> {
        Ok(())
    }
}
