//! Stock update domain service and restock detection.
//!
//! The restock edge is detected here, immediately after the stock mutation
//! has durably committed. The signal travels through the commit-synchronous
//! publisher port; this service never calls reset logic directly.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{
    ProductStore, ProductStoreError, RestockSignalPublisher, StockCommand, StockUpdateOutcome,
};
use crate::domain::{Error, RestockSignal};

fn map_store_error(error: ProductStoreError) -> Error {
    match error {
        ProductStoreError::Connection { message } => {
            Error::service_unavailable(format!("product store unavailable: {message}"))
        }
        ProductStoreError::Query { message } => {
            Error::internal(format!("product store error: {message}"))
        }
    }
}

/// Domain service implementing [`StockCommand`].
#[derive(Clone)]
pub struct StockUpdateService {
    products: Arc<dyn ProductStore>,
    restock_signals: Arc<dyn RestockSignalPublisher>,
}

impl StockUpdateService {
    /// Create the service over the product store and signal publisher.
    pub fn new(
        products: Arc<dyn ProductStore>,
        restock_signals: Arc<dyn RestockSignalPublisher>,
    ) -> Self {
        Self {
            products,
            restock_signals,
        }
    }
}

#[async_trait]
impl StockCommand for StockUpdateService {
    async fn update_stock(
        &self,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<StockUpdateOutcome, Error> {
        if quantity < 0 {
            return Err(Error::invalid_request("stock quantity must not be negative"));
        }

        let change = self
            .products
            .set_stock(&product_id, quantity)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;

        let signal = RestockSignal {
            product_id: change.product_id,
            previous_stock: change.previous,
            current_stock: change.current,
        };

        let restocked = signal.is_restock();
        if restocked {
            info!(
                %product_id,
                previous = change.previous,
                current = change.current,
                "restock detected"
            );
            // The stock write is already committed; a publish failure loses
            // this cycle's coordination but must not fail the update.
            if let Err(err) = self.restock_signals.publish(signal).await {
                error!(%product_id, error = %err, "failed to publish restock signal");
            }
        }

        Ok(StockUpdateOutcome { change, restocked })
    }
}

#[cfg(test)]
#[path = "stock_service_tests.rs"]
mod tests;
