//! Subscription ledger domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    Page, SubscribeRequest, SubscriptionCommand, SubscriptionQuery, SubscriptionRepository,
    SubscriptionRepositoryError, UnsubscribeRequest,
};
use crate::domain::{Error, RestockSubscription, UserId};
use uuid::Uuid;

fn map_repository_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription ledger unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription ledger error: {message}"))
        }
        SubscriptionRepositoryError::Duplicate => {
            Error::conflict("an active restock subscription already exists for this product")
        }
        SubscriptionRepositoryError::MissingProduct => Error::not_found("product not found"),
    }
}

/// Domain service implementing [`SubscriptionCommand`] and
/// [`SubscriptionQuery`].
#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    /// Create the service over the subscription ledger port.
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }
}

#[async_trait]
impl SubscriptionCommand for SubscriptionService {
    async fn subscribe(&self, request: SubscribeRequest) -> Result<RestockSubscription, Error> {
        let SubscribeRequest {
            product_id,
            user_id,
        } = request;

        if self
            .subscriptions
            .find_active(&product_id, &user_id)
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(map_repository_error(SubscriptionRepositoryError::Duplicate));
        }

        // Subscribing again after having been notified means "subscribe for
        // the next restock": reopen the delivered row instead of duplicating.
        if let Some(mut delivered) = self
            .subscriptions
            .find_delivered(&product_id, &user_id)
            .await
            .map_err(map_repository_error)?
        {
            self.subscriptions
                .reopen(&delivered.id)
                .await
                .map_err(map_repository_error)?;
            delivered.reopen();
            return Ok(delivered);
        }

        let subscription = RestockSubscription::new(product_id, user_id);
        self.subscriptions
            .insert(&subscription)
            .await
            .map_err(map_repository_error)?;
        Ok(subscription)
    }

    async fn unsubscribe(&self, request: UnsubscribeRequest) -> Result<(), Error> {
        let subscription = self
            .subscriptions
            .find_by_id(&request.subscription_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "subscription {} not found",
                    request.subscription_id
                ))
            })?;

        if !subscription.is_owned_by(&request.requester) {
            return Err(Error::forbidden(
                "subscriptions may only be removed by their owner",
            ));
        }

        self.subscriptions
            .delete(&request.subscription_id)
            .await
            .map_err(map_repository_error)?;
        Ok(())
    }
}

#[async_trait]
impl SubscriptionQuery for SubscriptionService {
    async fn subscriptions_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, Error> {
        self.subscriptions
            .list_for_user(&user_id, page)
            .await
            .map_err(map_repository_error)
    }

    async fn subscriptions_for_product(
        &self,
        product_id: Uuid,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, Error> {
        self.subscriptions
            .list_for_product(&product_id, page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
