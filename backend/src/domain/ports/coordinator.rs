//! Driving port for the restock coordinator.

use async_trait::async_trait;

use crate::domain::{Error, RestockSignal};

/// Driving port consumed by the restock signal worker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestockCoordinator: Send + Sync {
    /// React to a committed stock change.
    ///
    /// Non-restock transitions are ignored. For a true 0→positive edge the
    /// coordinator resets the vote ledger and counter, reopens delivered
    /// subscriptions, schedules dispatch, and clears the admin alert marker.
    async fn handle_signal(&self, signal: RestockSignal) -> Result<(), Error>;
}
