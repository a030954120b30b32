//! Scenario world wiring the full restock service graph.
//!
//! The graph runs over the in-memory adapters but uses the real signal bus,
//! dispatch queue, and worker tasks, so scenarios observe the same
//! asynchronous hand-offs as production. Steps drive async services through
//! a runtime owned by the world.

use std::sync::Arc;
use std::time::{Duration, Instant};

use backend::domain::ports::{
    AlertMarkerStore, CastVoteRequest, NotificationRepository, ProductStore, StockCommand,
    SubscribeRequest, SubscriptionCommand, SubscriptionRepository, UserDirectory, VoteCommand,
    VoteCounterStore, VoteQuery, VoteRepository,
};
use backend::domain::{
    Error, NotificationDispatchService, NotificationKind, RestockCoordinatorService,
    StockUpdateService, SubscriptionService, ThresholdAlerter, UserId, VoteService,
    DEFAULT_ALERT_MARKER_TTL, DEFAULT_VOTE_ALERT_THRESHOLD,
};
use backend::outbound::channel::{
    dispatch_queue_channel, restock_signal_channel, spawn_coordinator_worker,
    spawn_dispatch_worker,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::in_memory::Adapters;

/// Wrapper for the non-Clone runtime handle.
#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

/// The driving services exposed to scenario steps.
#[derive(Clone)]
pub struct Services {
    pub votes: Arc<VoteService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub stock: Arc<StockUpdateService>,
}

async fn build_services(adapters: &Adapters, threshold: i64) -> Services {
    let votes: Arc<dyn VoteRepository> = Arc::new(adapters.votes.clone());
    let subscriptions: Arc<dyn SubscriptionRepository> = Arc::new(adapters.subscriptions.clone());
    let products: Arc<dyn ProductStore> = Arc::new(adapters.products.clone());
    let counter: Arc<dyn VoteCounterStore> = Arc::new(adapters.counter.clone());
    let markers: Arc<dyn AlertMarkerStore> = Arc::new(adapters.markers.clone());
    let accounts: Arc<dyn UserDirectory> = Arc::new(adapters.accounts.clone());
    let inbox: Arc<dyn NotificationRepository> = Arc::new(adapters.inbox.clone());

    let (signal_publisher, signal_receiver) = restock_signal_channel();
    let (dispatch_queue, dispatch_receiver) = dispatch_queue_channel();

    let alerter = Arc::new(ThresholdAlerter::new(
        markers.clone(),
        inbox.clone(),
        accounts.clone(),
        products.clone(),
        threshold,
        DEFAULT_ALERT_MARKER_TTL,
    ));

    let vote_service = Arc::new(VoteService::new(votes.clone(), counter.clone(), alerter));
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
        accounts,
        inbox,
    ));

    spawn_coordinator_worker(coordinator, signal_receiver);
    spawn_dispatch_worker(dispatcher, dispatch_receiver);

    Services {
        votes: vote_service,
        subscriptions: subscription_service,
        stock: stock_service,
    }
}

/// World state for restock flow scenarios.
#[derive(Default, ScenarioState)]
pub struct RestockWorld {
    runtime: Slot<RuntimeHandle>,
    adapters: Slot<Adapters>,
    services: Slot<Services>,
    product_id: Slot<Uuid>,
    customer_id: Slot<UserId>,
    subscription_id: Slot<Uuid>,
    last_vote_error: Slot<Error>,
}

impl RestockWorld {
    /// Build the service graph and start the worker tasks.
    pub fn bootstrap(&self) {
        let runtime = Runtime::new().expect("create runtime");
        let adapters = Adapters::default();
        let services = runtime.block_on(build_services(&adapters, DEFAULT_VOTE_ALERT_THRESHOLD));

        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.adapters.set(adapters);
        self.services.set(services);
    }

    fn runtime(&self) -> Arc<Runtime> {
        self.runtime.get().expect("world not bootstrapped").0
    }

    fn adapters_ref(&self) -> Adapters {
        self.adapters.get().expect("world not bootstrapped")
    }

    fn services_ref(&self) -> Services {
        self.services.get().expect("world not bootstrapped")
    }

    fn product(&self) -> Uuid {
        self.product_id.get().expect("product registered")
    }

    fn customer(&self) -> UserId {
        self.customer_id.get().expect("customer registered")
    }

    /// Register a product on the shelf.
    pub fn add_product(&self, name: &str, stock: i32) {
        let id = self.adapters_ref().products.add(name, stock);
        self.product_id.set(id);
    }

    /// Register the scenario's customer account.
    pub fn register_customer(&self) {
        let id = self.adapters_ref().accounts.add_customer("Robin Carter");
        self.customer_id.set(id);
    }

    /// Cast the customer's vote; failures are retained for later asserts.
    pub fn cast_vote(&self) {
        let services = self.services_ref();
        let request = CastVoteRequest {
            product_id: self.product(),
            user_id: self.customer(),
        };
        if let Err(error) = self.runtime().block_on(services.votes.cast_vote(request)) {
            self.last_vote_error.set(error);
        }
    }

    /// Subscribe the customer to restock alerts.
    pub fn subscribe(&self) {
        let services = self.services_ref();
        let request = SubscribeRequest {
            product_id: self.product(),
            user_id: self.customer(),
        };
        let subscription = self
            .runtime()
            .block_on(services.subscriptions.subscribe(request))
            .expect("subscribe");
        self.subscription_id.set(subscription.id);
    }

    /// Commit a stock update through the stock service.
    pub fn set_stock(&self, quantity: i32) {
        let services = self.services_ref();
        let product_id = self.product();
        self.runtime()
            .block_on(services.stock.update_stock(product_id, quantity))
            .expect("stock update");
    }

    /// Live vote count as the public read path reports it.
    pub fn vote_count(&self) -> i64 {
        let services = self.services_ref();
        let product_id = self.product();
        self.runtime()
            .block_on(services.votes.vote_count(product_id))
    }

    fn restock_notification_count(&self) -> usize {
        self.adapters_ref()
            .inbox
            .of_kind(NotificationKind::Restock)
            .len()
    }

    /// Block until the inbox holds exactly `expected` restock notifications.
    ///
    /// The flow is asynchronous (signal bus, then dispatch queue), so the
    /// assertion polls with a deadline instead of racing the workers.
    pub fn await_restock_notifications(&self, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.restock_notification_count() < expected {
            assert!(
                Instant::now() < deadline,
                "timed out waiting for {expected} restock notifications"
            );
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(self.restock_notification_count(), expected);
    }

    /// Give the background workers time to act, then confirm nothing was
    /// delivered.
    pub fn assert_no_restock_notifications(&self) {
        std::thread::sleep(Duration::from_millis(150));
        assert_eq!(self.restock_notification_count(), 0);
    }

    /// Row count in the durable vote ledger.
    pub fn ledger_rows(&self) -> usize {
        let product_id = self.product();
        self.adapters_ref().votes.rows_for_product(&product_id)
    }

    /// Delivered flag of the scenario's subscription.
    pub fn subscription_delivered(&self) -> bool {
        let id = self.subscription_id.get().expect("subscription created");
        self.adapters_ref()
            .subscriptions
            .is_delivered(&id)
            .expect("subscription row exists")
    }

    /// The most recent vote failure, if any.
    pub fn last_vote_error(&self) -> Option<Error> {
        self.last_vote_error.get()
    }
}
