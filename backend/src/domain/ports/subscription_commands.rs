//! Driving ports for subscription use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use super::page::Page;
use crate::domain::{Error, RestockSubscription, UserId};

/// Request to subscribe to a product's restock notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeRequest {
    /// Product to watch.
    pub product_id: Uuid,
    /// Authenticated account subscribing.
    pub user_id: UserId,
}

/// Request to remove a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsubscribeRequest {
    /// The subscription's surrogate id.
    pub subscription_id: Uuid,
    /// Authenticated account requesting the removal.
    pub requester: UserId,
}

/// Driving port for subscription mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// Subscribe for the next restock.
    ///
    /// Reopens an already delivered subscription instead of erroring;
    /// `Conflict` only when an active one exists.
    async fn subscribe(&self, request: SubscribeRequest) -> Result<RestockSubscription, Error>;

    /// Remove a subscription regardless of delivered state; `NotFound` when
    /// absent, `Forbidden` when not owned by the requester.
    async fn unsubscribe(&self, request: UnsubscribeRequest) -> Result<(), Error>;
}

/// Driving port for the subscription read paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionQuery: Send + Sync {
    /// A user's own subscriptions, newest first, delivered or not.
    async fn subscriptions_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, Error>;

    /// Every subscription watching a product, newest first.
    async fn subscriptions_for_product(
        &self,
        product_id: Uuid,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, Error>;
}
