//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    StockCommand, SubscriptionCommand, SubscriptionQuery, VoteCommand, VoteQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Vote mutations (cast, cancel).
    pub votes: Arc<dyn VoteCommand>,
    /// Vote read paths (live count, listings).
    pub vote_queries: Arc<dyn VoteQuery>,
    /// Subscription mutations (subscribe, unsubscribe).
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    /// Subscription listings.
    pub subscription_queries: Arc<dyn SubscriptionQuery>,
    /// Stock updates with restock detection.
    pub stock: Arc<dyn StockCommand>,
}

impl HttpState {
    /// Bundle the driving ports for handler injection.
    pub fn new(
        votes: Arc<dyn VoteCommand>,
        vote_queries: Arc<dyn VoteQuery>,
        subscriptions: Arc<dyn SubscriptionCommand>,
        subscription_queries: Arc<dyn SubscriptionQuery>,
        stock: Arc<dyn StockCommand>,
    ) -> Self {
        Self {
            votes,
            vote_queries,
            subscriptions,
            subscription_queries,
            stock,
        }
    }
}
