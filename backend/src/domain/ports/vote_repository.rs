//! Port for the durable vote ledger.
//!
//! The ledger is the authoritative record of restock votes. The unique
//! index on `(product_id, user_id)` is the sole concurrency guard against
//! duplicate rows; concurrent duplicate attempts surface as
//! [`VoteRepositoryError::Duplicate`] rather than racing to two rows.

use async_trait::async_trait;
use uuid::Uuid;

use super::page::Page;
use crate::domain::{UserId, Vote};

/// Errors raised by vote ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteRepositoryError {
    /// Repository connection could not be established.
    #[error("vote ledger connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("vote ledger query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// A vote already exists for this `(product, user)` pair.
    #[error("vote already recorded for this product and user")]
    Duplicate,
    /// The referenced product does not exist in the catalogue.
    #[error("voted product does not exist")]
    MissingProduct,
}

impl VoteRepositoryError {
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

/// Port for vote ledger storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Persist a new vote.
    ///
    /// Fails with [`VoteRepositoryError::Duplicate`] when a vote already
    /// exists for the same `(product_id, user_id)` pair.
    async fn insert(&self, vote: &Vote) -> Result<(), VoteRepositoryError>;

    /// Fetch a vote by its surrogate id.
    async fn find_by_id(&self, vote_id: &Uuid) -> Result<Option<Vote>, VoteRepositoryError>;

    /// Delete a single vote; returns whether a row existed.
    async fn delete(&self, vote_id: &Uuid) -> Result<bool, VoteRepositoryError>;

    /// Count votes for a product. Authoritative but slower than the cache.
    async fn count_for_product(&self, product_id: &Uuid) -> Result<i64, VoteRepositoryError>;

    /// List a user's votes, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError>;

    /// List the votes recorded for a product, newest first.
    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError>;

    /// Delete every vote for a product; returns the number of rows removed.
    ///
    /// Coordinator-only: called as part of the restock reset.
    async fn delete_all_for_product(&self, product_id: &Uuid)
        -> Result<u64, VoteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the vote ledger.
///
/// Inserts succeed, lookups miss, and counts read as zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteRepository;

#[async_trait]
impl VoteRepository for FixtureVoteRepository {
    async fn insert(&self, _vote: &Vote) -> Result<(), VoteRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _vote_id: &Uuid) -> Result<Option<Vote>, VoteRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _vote_id: &Uuid) -> Result<bool, VoteRepositoryError> {
        Ok(false)
    }

    async fn count_for_product(&self, _product_id: &Uuid) -> Result<i64, VoteRepositoryError> {
        Ok(0)
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
        _page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_product(
        &self,
        _product_id: &Uuid,
        _page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_all_for_product(
        &self,
        _product_id: &Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        Ok(0)
    }
}
