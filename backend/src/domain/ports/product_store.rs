//! Port for the product collaborator.
//!
//! The catalogue is owned by the wider storefront; this subsystem reads
//! product records and performs exactly one mutation, the stock update. The
//! stock update must commit before its [`crate::domain::RestockSignal`] is
//! published, so `set_stock` returns the before/after pair observed inside
//! the committed transaction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Product, StockChange};

/// Errors raised by product store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductStoreError {
    /// Store connection could not be established.
    #[error("product store connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("product store query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl ProductStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for product reads and the stock mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch a product by id.
    async fn find_by_id(&self, product_id: &Uuid)
        -> Result<Option<Product>, ProductStoreError>;

    /// Durably set a product's stock, returning the committed before/after
    /// pair, or `None` when the product does not exist.
    ///
    /// The previous value must be read under a row lock within the same
    /// transaction as the write so concurrent updates serialise.
    async fn set_stock(
        &self,
        product_id: &Uuid,
        quantity: i32,
    ) -> Result<Option<StockChange>, ProductStoreError>;
}

/// Fixture store with no products.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductStore;

#[async_trait]
impl ProductStore for FixtureProductStore {
    async fn find_by_id(
        &self,
        _product_id: &Uuid,
    ) -> Result<Option<Product>, ProductStoreError> {
        Ok(None)
    }

    async fn set_stock(
        &self,
        _product_id: &Uuid,
        _quantity: i32,
    ) -> Result<Option<StockChange>, ProductStoreError> {
        Ok(None)
    }
}
