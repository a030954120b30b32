//! Restock coordination service.
//!
//! The orchestration core: on a restock signal it resets the vote state,
//! reopens delivered subscriptions, schedules notification dispatch, and
//! clears the admin alert dedup marker. The synchronous reset steps must
//! both complete before dispatch is scheduled; dispatch failures never roll
//! them back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    AlertMarkerStore, DispatchQueue, ProductStore, RestockCoordinator, SubscriptionRepository,
    VoteCounterStore, VoteRepository,
};
use crate::domain::{Error, RestockSignal};

/// Domain service implementing [`RestockCoordinator`].
#[derive(Clone)]
pub struct RestockCoordinatorService {
    products: Arc<dyn ProductStore>,
    votes: Arc<dyn VoteRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    counter: Arc<dyn VoteCounterStore>,
    alert_markers: Arc<dyn AlertMarkerStore>,
    dispatch: Arc<dyn DispatchQueue>,
}

impl RestockCoordinatorService {
    /// Create the coordinator over its driven ports.
    pub fn new(
        products: Arc<dyn ProductStore>,
        votes: Arc<dyn VoteRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        counter: Arc<dyn VoteCounterStore>,
        alert_markers: Arc<dyn AlertMarkerStore>,
        dispatch: Arc<dyn DispatchQueue>,
    ) -> Self {
        Self {
            products,
            votes,
            subscriptions,
            counter,
            alert_markers,
            dispatch,
        }
    }

    /// Delete all votes and remove the counter entry outright.
    ///
    /// The counter is deleted, not decremented to zero: the next read
    /// misses and repopulates from the now-empty ledger, so no arithmetic
    /// has to be trusted.
    async fn reset_votes(&self, product_id: &Uuid) -> Result<(), Error> {
        let removed = self
            .votes
            .delete_all_for_product(product_id)
            .await
            .map_err(|err| Error::internal(format!("vote reset failed: {err}")))?;
        debug!(%product_id, removed, "vote ledger cleared");

        self.counter
            .delete(product_id)
            .await
            .map_err(|err| Error::internal(format!("vote counter delete failed: {err}")))?;
        Ok(())
    }

    /// The synchronous reset unit: vote reset, then subscription reopen.
    ///
    /// Both operations are idempotent, so the caller may retry the whole
    /// unit on partial failure.
    async fn reset_unit(&self, product_id: &Uuid) -> Result<u64, Error> {
        self.reset_votes(product_id).await?;
        self.subscriptions
            .reopen_all_delivered(product_id)
            .await
            .map_err(|err| Error::internal(format!("subscription reopen failed: {err}")))
    }
}

#[async_trait]
impl RestockCoordinator for RestockCoordinatorService {
    async fn handle_signal(&self, signal: RestockSignal) -> Result<(), Error> {
        // Defensive re-check of the edge condition; the detector should
        // only publish true restocks.
        if !signal.is_restock() {
            debug!(
                product_id = %signal.product_id,
                previous = signal.previous_stock,
                current = signal.current_stock,
                "ignoring non-restock stock transition"
            );
            return Ok(());
        }

        let product_id = signal.product_id;
        let product = self
            .products
            .find_by_id(&product_id)
            .await
            .map_err(|err| Error::internal(format!("product load failed: {err}")))?
            .ok_or_else(|| {
                // A signal for a product that no longer exists is a
                // data-integrity anomaly, not a retryable condition.
                Error::internal(format!("restocked product {product_id} missing from store"))
            })?;

        let reopened = match self.reset_unit(&product_id).await {
            Ok(reopened) => reopened,
            Err(first) => {
                warn!(%product_id, error = %first, "restock reset failed; retrying the unit once");
                self.reset_unit(&product_id).await?
            }
        };

        info!(
            %product_id,
            product = %product.name,
            reopened,
            "restock state reset; scheduling notification dispatch"
        );

        // Fire-and-forget: an enqueue failure is logged but never undoes
        // the reset that just committed.
        if let Err(err) = self.dispatch.enqueue(product_id).await {
            error!(%product_id, error = %err, "failed to schedule restock dispatch");
        }

        if let Err(err) = self.alert_markers.clear(&product_id).await {
            warn!(%product_id, error = %err, "failed to clear admin alert marker");
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "restock_coordinator_tests.rs"]
mod tests;
