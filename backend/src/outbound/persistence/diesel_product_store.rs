//! PostgreSQL-backed product store using Diesel.
//!
//! `set_stock` reads the previous quantity under `FOR UPDATE` inside the
//! same transaction as the write, so concurrent stock updates serialise and
//! every observed before/after pair corresponds to a committed change.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ProductStore, ProductStoreError};
use crate::domain::{Product, StockChange};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductRow;
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the product store port.
#[derive(Clone)]
pub struct DieselProductStore {
    pool: DbPool,
}

impl DieselProductStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProductStoreError {
    map_pool_error(error, ProductStoreError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ProductStoreError {
    map_diesel_error(
        error,
        ProductStoreError::query,
        ProductStoreError::connection,
    )
}

#[async_trait]
impl ProductStore for DieselProductStore {
    async fn find_by_id(
        &self,
        product_id: &Uuid,
    ) -> Result<Option<Product>, ProductStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = products::table
            .filter(products::id.eq(product_id))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Product::from))
    }

    async fn set_stock(
        &self,
        product_id: &Uuid,
        quantity: i32,
    ) -> Result<Option<StockChange>, ProductStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let product_id = *product_id;

        let change = conn
            .transaction::<Option<StockChange>, diesel::result::Error, _>(|conn| {
                async move {
                    let previous = products::table
                        .filter(products::id.eq(product_id))
                        .select(products::stock)
                        .for_update()
                        .first::<i32>(conn)
                        .await
                        .optional()?;

                    let Some(previous) = previous else {
                        return Ok(None);
                    };

                    diesel::update(products::table.filter(products::id.eq(product_id)))
                        .set((
                            products::stock.eq(quantity),
                            products::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;

                    Ok(Some(StockChange {
                        product_id,
                        previous,
                        current: quantity,
                    }))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        Ok(change)
    }
}
