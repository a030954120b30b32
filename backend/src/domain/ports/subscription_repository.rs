//! Port for the durable subscription ledger.
//!
//! Active uniqueness (one `delivered = false` row per pair) is enforced by a
//! partial unique index; delivered rows are reopened rather than duplicated.

use async_trait::async_trait;
use uuid::Uuid;

use super::page::Page;
use crate::domain::{RestockSubscription, UserId};

/// Errors raised by subscription ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    /// Repository connection could not be established.
    #[error("subscription ledger connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("subscription ledger query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// An active subscription already exists for this `(product, user)` pair.
    #[error("an active subscription already exists for this product and user")]
    Duplicate,
    /// The referenced product does not exist in the catalogue.
    #[error("subscribed product does not exist")]
    MissingProduct,
}

impl SubscriptionRepositoryError {
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

/// Port for subscription ledger storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Persist a new subscription.
    ///
    /// Fails with [`SubscriptionRepositoryError::Duplicate`] when an active
    /// subscription already exists for the same pair.
    async fn insert(
        &self,
        subscription: &RestockSubscription,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Fetch a subscription by its surrogate id.
    async fn find_by_id(
        &self,
        subscription_id: &Uuid,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError>;

    /// Fetch the active (`delivered = false`) subscription for a pair.
    async fn find_active(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError>;

    /// Fetch the most recent delivered subscription for a pair.
    async fn find_delivered(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError>;

    /// Set `delivered = true` on a single subscription. Dispatcher-only.
    async fn mark_delivered(
        &self,
        subscription_id: &Uuid,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Set `delivered = false` on a single subscription.
    async fn reopen(&self, subscription_id: &Uuid) -> Result<(), SubscriptionRepositoryError>;

    /// Set `delivered = false` on every delivered subscription for a product.
    ///
    /// Coordinator-only: makes repeat restocks notify long-term subscribers
    /// every cycle. Returns the number of rows reopened.
    async fn reopen_all_delivered(
        &self,
        product_id: &Uuid,
    ) -> Result<u64, SubscriptionRepositoryError>;

    /// List subscriptions for a product with `delivered = false`.
    async fn list_pending_for_product(
        &self,
        product_id: &Uuid,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError>;

    /// List a user's subscriptions, newest first, delivered or not.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError>;

    /// List every subscription for a product, newest first, delivered or
    /// not.
    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError>;

    /// Delete a subscription regardless of delivered state; returns whether
    /// a row existed.
    async fn delete(&self, subscription_id: &Uuid) -> Result<bool, SubscriptionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn insert(
        &self,
        _subscription: &RestockSubscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _subscription_id: &Uuid,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(None)
    }

    async fn find_active(
        &self,
        _product_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(None)
    }

    async fn find_delivered(
        &self,
        _product_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(None)
    }

    async fn mark_delivered(
        &self,
        _subscription_id: &Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }

    async fn reopen(&self, _subscription_id: &Uuid) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }

    async fn reopen_all_delivered(
        &self,
        _product_id: &Uuid,
    ) -> Result<u64, SubscriptionRepositoryError> {
        Ok(0)
    }

    async fn list_pending_for_product(
        &self,
        _product_id: &Uuid,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
        _page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_product(
        &self,
        _product_id: &Uuid,
        _page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(
        &self,
        _subscription_id: &Uuid,
    ) -> Result<bool, SubscriptionRepositoryError> {
        Ok(false)
    }
}
