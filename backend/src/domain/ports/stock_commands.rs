//! Driving port for stock updates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, StockChange};

/// Outcome of a committed stock update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdateOutcome {
    /// The committed before/after stock pair.
    pub change: StockChange,
    /// Whether the change was a 0→positive edge and a restock signal was
    /// published.
    pub restocked: bool,
}

/// Driving port for the stock mutation entry point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockCommand: Send + Sync {
    /// Durably set a product's stock and, on a restock edge, publish the
    /// signal after commit.
    async fn update_stock(
        &self,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<StockUpdateOutcome, Error>;
}
