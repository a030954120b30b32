//! PostgreSQL-backed vote ledger using Diesel.
//!
//! The unique index on `(product_id, user_id)` is the sole duplicate guard;
//! concurrent double votes surface here as
//! [`VoteRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{Page, VoteRepository, VoteRepositoryError};
use crate::domain::{UserId, Vote};

use super::diesel_error_mapping::{
    is_missing_product_violation, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::restock_votes;

/// Diesel-backed implementation of the vote ledger port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> VoteRepositoryError {
    map_pool_error(error, VoteRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> VoteRepositoryError {
    if is_unique_violation(&error) {
        return VoteRepositoryError::Duplicate;
    }
    if is_missing_product_violation(&error) {
        return VoteRepositoryError::MissingProduct;
    }
    map_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn insert(&self, vote: &Vote) -> Result<(), VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(restock_votes::table)
            .values(NewVoteRow::from(vote))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(&self, vote_id: &Uuid) -> Result<Option<Vote>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = restock_votes::table
            .filter(restock_votes::id.eq(vote_id))
            .select(VoteRow::as_select())
            .first::<VoteRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Vote::from))
    }

    async fn delete(&self, vote_id: &Uuid) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(restock_votes::table.filter(restock_votes::id.eq(vote_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(removed > 0)
    }

    async fn count_for_product(&self, product_id: &Uuid) -> Result<i64, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        restock_votes::table
            .filter(restock_votes::product_id.eq(product_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<VoteRow> = restock_votes::table
            .filter(restock_votes::user_id.eq(user_id.as_uuid()))
            .order(restock_votes::created_at.desc())
            .limit(page.limit)
            .offset(page.offset)
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Vote::from).collect())
    }

    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<VoteRow> = restock_votes::table
            .filter(restock_votes::product_id.eq(product_id))
            .order(restock_votes::created_at.desc())
            .limit(page.limit)
            .offset(page.offset)
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Vote::from).collect())
    }

    async fn delete_all_for_product(
        &self,
        product_id: &Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed =
            diesel::delete(restock_votes::table.filter(restock_votes::product_id.eq(product_id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel)?;

        Ok(removed as u64)
    }
}
