//! Construction of the service graph behind the HTTP surface.
//!
//! Wires the Diesel repositories, the Redis cache, the restock signal bus,
//! and the dispatch queue into the domain services, then spawns the worker
//! tasks that consume the channels.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    NotificationDispatchService, RestockCoordinatorService, StockUpdateService,
    SubscriptionService, ThresholdAlerter, VoteService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::{RedisCacheError, RedisRestockCache};
use crate::outbound::channel::{
    dispatch_queue_channel, restock_signal_channel, spawn_coordinator_worker,
    spawn_dispatch_worker,
};
use crate::outbound::persistence::{
    DbPool, DieselNotificationRepository, DieselProductStore, DieselSubscriptionRepository,
    DieselUserDirectory, DieselVoteRepository, PoolConfig, PoolError,
};
use crate::server::ServerSettings;

/// Errors raised while building the runtime service graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required configuration value is absent.
    #[error("missing required configuration: {name}")]
    MissingConfig {
        /// Name of the absent setting.
        name: &'static str,
    },
    /// The database pool could not be constructed.
    #[error(transparent)]
    Database(#[from] PoolError),
    /// The Redis cache could not be constructed.
    #[error(transparent)]
    Cache(#[from] RedisCacheError),
}

/// The assembled runtime: HTTP handler state plus the background workers.
pub struct RuntimeParts {
    /// Dependency bundle for HTTP handlers.
    pub http_state: HttpState,
    /// Worker draining the restock signal bus into the coordinator.
    pub coordinator_worker: JoinHandle<()>,
    /// Worker draining the dispatch queue into the dispatcher.
    pub dispatch_worker: JoinHandle<()>,
}

impl std::fmt::Debug for RuntimeParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeParts")
            .field("coordinator_worker", &self.coordinator_worker)
            .field("dispatch_worker", &self.dispatch_worker)
            .finish_non_exhaustive()
    }
}

/// Build the full service graph from configuration.
///
/// # Errors
///
/// Returns [`BuildError`] when a connection URL is missing or a pool cannot
/// be constructed.
pub async fn build_runtime(settings: &ServerSettings) -> Result<RuntimeParts, BuildError> {
    let database_url =
        settings
            .database_url
            .as_deref()
            .ok_or(BuildError::MissingConfig {
                name: "database_url",
            })?;
    let redis_url = settings
        .redis_url
        .as_deref()
        .ok_or(BuildError::MissingConfig { name: "redis_url" })?;

    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let cache = RedisRestockCache::connect(redis_url).await?;

    let votes = Arc::new(DieselVoteRepository::new(pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(pool.clone()));
    let notifications = Arc::new(DieselNotificationRepository::new(pool.clone()));
    let products = Arc::new(DieselProductStore::new(pool.clone()));
    let users = Arc::new(DieselUserDirectory::new(pool));
    let counter = Arc::new(cache.clone());
    let markers = Arc::new(cache);

    let alerter = Arc::new(ThresholdAlerter::new(
        markers.clone(),
        notifications.clone(),
        users.clone(),
        products.clone(),
        settings.vote_alert_threshold(),
        settings.alert_marker_ttl(),
    ));

    let (signal_publisher, signal_receiver) = restock_signal_channel();
    let (dispatch_queue, dispatch_receiver) = dispatch_queue_channel();

    let vote_service = Arc::new(VoteService::new(
        votes.clone(),
        counter.clone(),
        alerter,
    ));
    let subscription_service = Arc::new(SubscriptionService::new(subscriptions.clone()));
    let stock_service = Arc::new(StockUpdateService::new(
        products.clone(),
        Arc::new(signal_publisher),
    ));

    let coordinator = Arc::new(RestockCoordinatorService::new(
        products.clone(),
        votes,
        subscriptions.clone(),
        counter,
        markers,
        Arc::new(dispatch_queue),
    ));
    let dispatcher = Arc::new(NotificationDispatchService::new(
        products,
        subscriptions,
        users,
        notifications,
    ));

    let coordinator_worker = spawn_coordinator_worker(coordinator, signal_receiver);
    let dispatch_worker = spawn_dispatch_worker(dispatcher, dispatch_receiver);

    let http_state = HttpState::new(
        vote_service.clone(),
        vote_service,
        subscription_service.clone(),
        subscription_service,
        stock_service,
    );

    Ok(RuntimeParts {
        http_state,
        coordinator_worker,
        dispatch_worker,
    })
}
