//! Driving port for notification dispatch.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;

/// Per-pass delivery counts returned for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Subscribers notified and flagged delivered.
    pub notified: u32,
    /// Subscribers skipped after an isolated failure.
    pub failed: u32,
}

/// Driving port consumed by the dispatch queue worker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestockDispatcher: Send + Sync {
    /// Notify every pending subscriber of a product.
    ///
    /// Runs in its own execution context and re-fetches the product; a
    /// per-subscriber failure is logged and skipped, never aborting the
    /// batch. Errors are returned only when the batch itself could not be
    /// loaded.
    async fn dispatch(&self, product_id: Uuid) -> Result<DispatchSummary, Error>;
}
