//! Vote ledger and live counter domain service.
//!
//! Implements the vote driving ports over the vote ledger and counter
//! store. The durable write always happens before the cache mutation: a
//! crash between the two undercounts the cache, never overcounts it, and an
//! undercount self-heals on the next cache-miss fallback.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::ports::{
    CancelVoteRequest, CastVoteRequest, Page, VoteCommand, VoteCounterStore, VoteQuery,
    VoteRepository, VoteRepositoryError,
};
use crate::domain::threshold_alert::ThresholdAlerter;
use crate::domain::{Error, UserId, Vote};

fn map_repository_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote ledger unavailable: {message}"))
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote ledger error: {message}"))
        }
        VoteRepositoryError::Duplicate => {
            Error::conflict("a restock vote already exists for this product")
        }
        VoteRepositoryError::MissingProduct => Error::not_found("product not found"),
    }
}

/// Domain service implementing [`VoteCommand`] and [`VoteQuery`].
#[derive(Clone)]
pub struct VoteService {
    votes: Arc<dyn VoteRepository>,
    counter: Arc<dyn VoteCounterStore>,
    alerter: Arc<ThresholdAlerter>,
}

impl VoteService {
    /// Create the service over its driven ports.
    pub fn new(
        votes: Arc<dyn VoteRepository>,
        counter: Arc<dyn VoteCounterStore>,
        alerter: Arc<ThresholdAlerter>,
    ) -> Self {
        Self {
            votes,
            counter,
            alerter,
        }
    }

    /// Count votes from the ledger and repopulate the cache best-effort.
    async fn recount_from_ledger(&self, product_id: Uuid) -> i64 {
        let count = match self.votes.count_for_product(&product_id).await {
            Ok(count) => count,
            Err(err) => {
                // The read contract never fails; a dead ledger degrades to
                // zero rather than surfacing an error to the caller.
                error!(%product_id, error = %err, "vote ledger recount failed");
                return 0;
            }
        };

        if let Err(err) = self.counter.write(&product_id, count).await {
            warn!(%product_id, error = %err, "vote counter repopulation failed");
        }
        count
    }

    /// Cache read with ledger fallback; see the port contract on
    /// [`VoteQuery::vote_count`].
    async fn current_count(&self, product_id: Uuid) -> i64 {
        match self.counter.read(&product_id).await {
            Ok(Some(count)) if count >= 0 => count,
            // A decrement racing an eviction can recreate the key below
            // zero; treat that like a miss and recount.
            Ok(Some(count)) => {
                warn!(%product_id, count, "negative cached vote count; recounting");
                self.recount_from_ledger(product_id).await
            }
            Ok(None) => self.recount_from_ledger(product_id).await,
            Err(err) => {
                warn!(%product_id, error = %err, "vote counter read failed; using ledger");
                self.recount_from_ledger(product_id).await
            }
        }
    }
}

#[async_trait]
impl VoteCommand for VoteService {
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<Vote, Error> {
        let vote = Vote::new(request.product_id, request.user_id);
        self.votes.insert(&vote).await.map_err(map_repository_error)?;

        // Cache increment is best-effort; the ledger row already makes the
        // vote valid and the read path self-heals any undercount.
        if let Err(err) = self.counter.increment(&request.product_id).await {
            warn!(
                product_id = %request.product_id,
                error = %err,
                "vote counter increment failed after ledger write"
            );
        }

        let count = self.current_count(request.product_id).await;
        self.alerter.maybe_alert(request.product_id, count).await;

        Ok(vote)
    }

    async fn cancel_vote(&self, request: CancelVoteRequest) -> Result<(), Error> {
        let vote = self
            .votes
            .find_by_id(&request.vote_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("vote {} not found", request.vote_id)))?;

        if !vote.is_owned_by(&request.requester) {
            return Err(Error::forbidden("votes may only be cancelled by their caster"));
        }

        self.votes
            .delete(&request.vote_id)
            .await
            .map_err(map_repository_error)?;

        match self.counter.decrement(&vote.product_id).await {
            // Decrementing an evicted key creates it below zero; drop the
            // entry so the next read recounts from the ledger.
            Ok(count) if count < 0 => {
                if let Err(err) = self.counter.delete(&vote.product_id).await {
                    warn!(
                        product_id = %vote.product_id,
                        error = %err,
                        "dropping an underflowed vote counter failed"
                    );
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    product_id = %vote.product_id,
                    error = %err,
                    "vote counter decrement failed after ledger delete"
                );
            }
        }

        Ok(())
    }
}

#[async_trait]
impl VoteQuery for VoteService {
    async fn vote_count(&self, product_id: Uuid) -> i64 {
        self.current_count(product_id).await
    }

    async fn votes_for_user(&self, user_id: UserId, page: Page) -> Result<Vec<Vote>, Error> {
        self.votes
            .list_for_user(&user_id, page)
            .await
            .map_err(map_repository_error)
    }

    async fn votes_for_product(&self, product_id: Uuid, page: Page) -> Result<Vec<Vote>, Error> {
        self.votes
            .list_for_product(&product_id, page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
