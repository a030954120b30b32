//! Notification dispatch domain service.
//!
//! Runs in its own execution context, scheduled through the dispatch queue,
//! so it re-fetches the product rather than trusting any coordinator state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    DispatchSummary, NotificationRepository, ProductStore, RestockDispatcher,
    SubscriptionRepository, UserDirectory,
};
use crate::domain::{Error, Notification, Product, RestockSubscription};

/// Domain service implementing [`RestockDispatcher`].
#[derive(Clone)]
pub struct NotificationDispatchService {
    products: Arc<dyn ProductStore>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationDispatchService {
    /// Create the dispatcher over its driven ports.
    pub fn new(
        products: Arc<dyn ProductStore>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            products,
            subscriptions,
            users,
            notifications,
        }
    }

    /// Notify one subscriber and flag the subscription delivered.
    async fn notify_subscriber(
        &self,
        product: &Product,
        subscription: &RestockSubscription,
    ) -> Result<(), Error> {
        self.users
            .find_by_id(&subscription.user_id)
            .await
            .map_err(|err| Error::internal(format!("subscriber lookup failed: {err}")))?
            .ok_or_else(|| {
                Error::not_found(format!("subscriber {} not found", subscription.user_id))
            })?;

        let notification = Notification::restock(subscription.user_id, &product.name);
        self.notifications
            .create(&notification)
            .await
            .map_err(|err| Error::internal(format!("notification create failed: {err}")))?;

        self.subscriptions
            .mark_delivered(&subscription.id)
            .await
            .map_err(|err| Error::internal(format!("delivered flag update failed: {err}")))?;
        Ok(())
    }
}

#[async_trait]
impl RestockDispatcher for NotificationDispatchService {
    async fn dispatch(&self, product_id: Uuid) -> Result<DispatchSummary, Error> {
        let product = self
            .products
            .find_by_id(&product_id)
            .await
            .map_err(|err| Error::internal(format!("product load failed: {err}")))?
            .ok_or_else(|| {
                Error::not_found(format!("product {product_id} not found for dispatch"))
            })?;

        let pending = self
            .subscriptions
            .list_pending_for_product(&product_id)
            .await
            .map_err(|err| Error::internal(format!("pending subscription load failed: {err}")))?;

        let mut summary = DispatchSummary::default();
        for subscription in &pending {
            match self.notify_subscriber(&product, subscription).await {
                Ok(()) => summary.notified += 1,
                Err(err) => {
                    // One bad subscriber must not abort the batch.
                    warn!(
                        %product_id,
                        subscription_id = %subscription.id,
                        user_id = %subscription.user_id,
                        error = %err,
                        "skipping subscriber after dispatch failure"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            %product_id,
            notified = summary.notified,
            failed = summary.failed,
            "restock dispatch pass complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "dispatch_service_tests.rs"]
mod tests;
