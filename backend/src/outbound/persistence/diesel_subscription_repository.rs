//! PostgreSQL-backed subscription ledger using Diesel.
//!
//! Active uniqueness rides on a partial unique index over
//! `(product_id, user_id) WHERE NOT delivered`; delivered rows fall outside
//! it, so a reopened row never conflicts with history.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{Page, SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{RestockSubscription, UserId};

use super::diesel_error_mapping::{
    is_missing_product_violation, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{NewSubscriptionRow, SubscriptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::restock_subscriptions;

/// Diesel-backed implementation of the subscription ledger port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SubscriptionRepositoryError {
    map_pool_error(error, SubscriptionRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> SubscriptionRepositoryError {
    if is_unique_violation(&error) {
        return SubscriptionRepositoryError::Duplicate;
    }
    if is_missing_product_violation(&error) {
        return SubscriptionRepositoryError::MissingProduct;
    }
    map_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn insert(
        &self,
        subscription: &RestockSubscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(restock_subscriptions::table)
            .values(NewSubscriptionRow::from(subscription))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(
        &self,
        subscription_id: &Uuid,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = restock_subscriptions::table
            .filter(restock_subscriptions::id.eq(subscription_id))
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(RestockSubscription::from))
    }

    async fn find_active(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = restock_subscriptions::table
            .filter(
                restock_subscriptions::product_id
                    .eq(product_id)
                    .and(restock_subscriptions::user_id.eq(user_id.as_uuid()))
                    .and(restock_subscriptions::delivered.eq(false)),
            )
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(RestockSubscription::from))
    }

    async fn find_delivered(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = restock_subscriptions::table
            .filter(
                restock_subscriptions::product_id
                    .eq(product_id)
                    .and(restock_subscriptions::user_id.eq(user_id.as_uuid()))
                    .and(restock_subscriptions::delivered.eq(true)),
            )
            .order(restock_subscriptions::created_at.desc())
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(RestockSubscription::from))
    }

    async fn mark_delivered(
        &self,
        subscription_id: &Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        self.set_delivered(subscription_id, true).await
    }

    async fn reopen(&self, subscription_id: &Uuid) -> Result<(), SubscriptionRepositoryError> {
        self.set_delivered(subscription_id, false).await
    }

    async fn reopen_all_delivered(
        &self,
        product_id: &Uuid,
    ) -> Result<u64, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let reopened = diesel::update(
            restock_subscriptions::table.filter(
                restock_subscriptions::product_id
                    .eq(product_id)
                    .and(restock_subscriptions::delivered.eq(true)),
            ),
        )
        .set(restock_subscriptions::delivered.eq(false))
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(reopened as u64)
    }

    async fn list_pending_for_product(
        &self,
        product_id: &Uuid,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<SubscriptionRow> = restock_subscriptions::table
            .filter(
                restock_subscriptions::product_id
                    .eq(product_id)
                    .and(restock_subscriptions::delivered.eq(false)),
            )
            .order(restock_subscriptions::created_at.asc())
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(RestockSubscription::from).collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<SubscriptionRow> = restock_subscriptions::table
            .filter(restock_subscriptions::user_id.eq(user_id.as_uuid()))
            .order(restock_subscriptions::created_at.desc())
            .limit(page.limit)
            .offset(page.offset)
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(RestockSubscription::from).collect())
    }

    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<SubscriptionRow> = restock_subscriptions::table
            .filter(restock_subscriptions::product_id.eq(product_id))
            .order(restock_subscriptions::created_at.desc())
            .limit(page.limit)
            .offset(page.offset)
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(RestockSubscription::from).collect())
    }

    async fn delete(&self, subscription_id: &Uuid) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(
            restock_subscriptions::table.filter(restock_subscriptions::id.eq(subscription_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(removed > 0)
    }
}

impl DieselSubscriptionRepository {
    async fn set_delivered(
        &self,
        subscription_id: &Uuid,
        delivered: bool,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(
            restock_subscriptions::table.filter(restock_subscriptions::id.eq(subscription_id)),
        )
        .set(restock_subscriptions::delivered.eq(delivered))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel)
    }
}
