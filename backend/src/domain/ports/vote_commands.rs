//! Driving ports for vote use-cases.
//!
//! HTTP handlers depend on these traits rather than on concrete services so
//! the adapter layer stays testable without I/O.

use async_trait::async_trait;
use uuid::Uuid;

use super::page::Page;
use crate::domain::{Error, UserId, Vote};

/// Request to record a restock vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVoteRequest {
    /// Product to vote for.
    pub product_id: Uuid,
    /// Authenticated account casting the vote.
    pub user_id: UserId,
}

/// Request to cancel a previously recorded vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelVoteRequest {
    /// The vote's surrogate id.
    pub vote_id: Uuid,
    /// Authenticated account requesting the cancellation.
    pub requester: UserId,
}

/// Driving port for vote mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    /// Record a vote; `Conflict` when one already exists for the pair.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<Vote, Error>;

    /// Cancel a vote; `NotFound` when absent, `Forbidden` when not owned by
    /// the requester.
    async fn cancel_vote(&self, request: CancelVoteRequest) -> Result<(), Error>;
}

/// Driving port for the vote read paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteQuery: Send + Sync {
    /// Current vote count for a product.
    ///
    /// Never fails: cache misses and outages fall back to the ledger, and a
    /// product nobody voted for reads as zero.
    async fn vote_count(&self, product_id: Uuid) -> i64;

    /// A user's own votes, newest first.
    async fn votes_for_user(&self, user_id: UserId, page: Page) -> Result<Vec<Vote>, Error>;

    /// The votes recorded for a product, newest first.
    async fn votes_for_product(&self, product_id: Uuid, page: Page) -> Result<Vec<Vote>, Error>;
}
