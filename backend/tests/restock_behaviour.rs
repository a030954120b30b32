//! Behavioural tests for the restock services over in-memory adapters.
//!
//! These cover the cross-service contracts the unit suites mock away: the
//! ledger fallback on counter outages, cache repopulation after a miss,
//! the coordinator's reset unit, dispatch fault isolation, and the
//! threshold alert rearming after a restock.

// Shared support helpers include pieces used by other integration suites.
#[allow(dead_code)]
mod support;

use std::sync::Arc;

use backend::domain::ports::{
    AlertMarkerStore, CancelVoteRequest, CastVoteRequest, RestockCoordinator, RestockDispatcher,
    SubscriptionRepository, VoteCommand, VoteCounterStore, VoteQuery, VoteRepository,
};
use backend::domain::{
    NotificationDispatchService, NotificationKind, RestockCoordinatorService, RestockSignal,
    RestockSubscription, ThresholdAlerter, UserId, Vote, VoteService, DEFAULT_ALERT_MARKER_TTL,
};
use uuid::Uuid;

use support::in_memory::{Adapters, RecordingDispatchQueue};

fn build_alerter(adapters: &Adapters, threshold: i64) -> Arc<ThresholdAlerter> {
    Arc::new(ThresholdAlerter::new(
        Arc::new(adapters.markers.clone()),
        Arc::new(adapters.inbox.clone()),
        Arc::new(adapters.accounts.clone()),
        Arc::new(adapters.products.clone()),
        threshold,
        DEFAULT_ALERT_MARKER_TTL,
    ))
}

fn build_vote_service(adapters: &Adapters, threshold: i64) -> VoteService {
    VoteService::new(
        Arc::new(adapters.votes.clone()),
        Arc::new(adapters.counter.clone()),
        build_alerter(adapters, threshold),
    )
}

fn build_coordinator(
    adapters: &Adapters,
    queue: &RecordingDispatchQueue,
) -> RestockCoordinatorService {
    RestockCoordinatorService::new(
        Arc::new(adapters.products.clone()),
        Arc::new(adapters.votes.clone()),
        Arc::new(adapters.subscriptions.clone()),
        Arc::new(adapters.counter.clone()),
        Arc::new(adapters.markers.clone()),
        Arc::new(queue.clone()),
    )
}

async fn cast(service: &VoteService, product_id: Uuid, user_id: UserId) {
    service
        .cast_vote(CastVoteRequest {
            product_id,
            user_id,
        })
        .await
        .expect("vote recorded");
}

fn restock(product_id: Uuid, current: i32) -> RestockSignal {
    RestockSignal {
        product_id,
        previous_stock: 0,
        current_stock: current,
    }
}

#[tokio::test]
async fn vote_count_falls_back_to_ledger_during_counter_outage() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 0);
    let service = build_vote_service(&adapters, i64::MAX);

    for _ in 0..3 {
        cast(&service, product_id, UserId::random()).await;
    }

    adapters.counter.set_unavailable(true);

    // The vote still lands in the ledger even though every counter
    // operation fails.
    cast(&service, product_id, UserId::random()).await;
    assert_eq!(service.vote_count(product_id).await, 4);
}

#[tokio::test]
async fn vote_count_repopulates_the_counter_after_a_miss() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 0);
    let service = build_vote_service(&adapters, i64::MAX);

    cast(&service, product_id, UserId::random()).await;
    cast(&service, product_id, UserId::random()).await;

    // Simulate eviction; the next read must recount from the ledger and
    // write the entry back.
    adapters
        .counter
        .delete(&product_id)
        .await
        .expect("counter delete");
    assert_eq!(adapters.counter.entry(&product_id), None);

    assert_eq!(service.vote_count(product_id).await, 2);
    assert_eq!(adapters.counter.entry(&product_id), Some(2));
}

#[tokio::test]
async fn cancelling_after_counter_eviction_never_shows_a_negative_count() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 0);
    let voter = UserId::random();
    let service = build_vote_service(&adapters, i64::MAX);

    let vote = service
        .cast_vote(CastVoteRequest {
            product_id,
            user_id: voter,
        })
        .await
        .expect("vote recorded");

    // Evict the counter entry, as Redis would under memory pressure. The
    // cancel's decrement would otherwise recreate the key at -1.
    adapters
        .counter
        .delete(&product_id)
        .await
        .expect("counter delete");

    service
        .cancel_vote(CancelVoteRequest {
            vote_id: vote.id,
            requester: voter,
        })
        .await
        .expect("vote cancelled");

    assert_eq!(service.vote_count(product_id).await, 0);
}

#[tokio::test]
async fn cancelling_a_vote_allows_voting_again() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 0);
    let voter = UserId::random();
    let service = build_vote_service(&adapters, i64::MAX);

    let vote = service
        .cast_vote(CastVoteRequest {
            product_id,
            user_id: voter,
        })
        .await
        .expect("first vote recorded");

    service
        .cancel_vote(CancelVoteRequest {
            vote_id: vote.id,
            requester: voter,
        })
        .await
        .expect("vote cancelled");
    assert_eq!(service.vote_count(product_id).await, 0);

    cast(&service, product_id, voter).await;
    assert_eq!(service.vote_count(product_id).await, 1);
}

#[tokio::test]
async fn restock_signal_resets_state_and_schedules_dispatch() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 5);

    for _ in 0..3 {
        adapters
            .votes
            .insert(&Vote::new(product_id, UserId::random()))
            .await
            .expect("seed vote");
    }
    adapters
        .counter
        .write(&product_id, 3)
        .await
        .expect("seed counter");

    let delivered = RestockSubscription::new(product_id, UserId::random());
    adapters
        .subscriptions
        .insert(&delivered)
        .await
        .expect("seed subscription");
    adapters
        .subscriptions
        .mark_delivered(&delivered.id)
        .await
        .expect("mark delivered");
    let pending = RestockSubscription::new(product_id, UserId::random());
    adapters
        .subscriptions
        .insert(&pending)
        .await
        .expect("seed subscription");

    adapters
        .markers
        .try_set(&product_id, DEFAULT_ALERT_MARKER_TTL)
        .await
        .expect("seed marker");

    let queue = RecordingDispatchQueue::default();
    let coordinator = build_coordinator(&adapters, &queue);
    coordinator
        .handle_signal(restock(product_id, 5))
        .await
        .expect("coordination succeeds");

    assert_eq!(adapters.votes.rows_for_product(&product_id), 0);
    assert_eq!(adapters.counter.entry(&product_id), None);
    assert_eq!(
        adapters.subscriptions.is_delivered(&delivered.id),
        Some(false)
    );
    assert_eq!(adapters.subscriptions.is_delivered(&pending.id), Some(false));
    assert_eq!(queue.enqueued(), vec![product_id]);
    assert!(!adapters.markers.is_set(&product_id));
}

#[tokio::test]
async fn non_restock_signal_leaves_state_untouched() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Camp stove", 6);
    adapters
        .votes
        .insert(&Vote::new(product_id, UserId::random()))
        .await
        .expect("seed vote");

    let queue = RecordingDispatchQueue::default();
    let coordinator = build_coordinator(&adapters, &queue);
    coordinator
        .handle_signal(RestockSignal {
            product_id,
            previous_stock: 2,
            current_stock: 6,
        })
        .await
        .expect("non-restock signal is ignored");

    assert_eq!(adapters.votes.rows_for_product(&product_id), 1);
    assert!(queue.enqueued().is_empty());
}

#[tokio::test]
async fn dispatch_isolates_per_subscriber_failures() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 5);
    let known = adapters.accounts.add_customer("Robin Carter");
    // Never registered in the directory; their notification must fail.
    let ghost = UserId::random();

    let reachable = RestockSubscription::new(product_id, known);
    let unreachable = RestockSubscription::new(product_id, ghost);
    adapters
        .subscriptions
        .insert(&reachable)
        .await
        .expect("seed subscription");
    adapters
        .subscriptions
        .insert(&unreachable)
        .await
        .expect("seed subscription");

    let dispatcher = NotificationDispatchService::new(
        Arc::new(adapters.products.clone()),
        Arc::new(adapters.subscriptions.clone()),
        Arc::new(adapters.accounts.clone()),
        Arc::new(adapters.inbox.clone()),
    );

    let summary = dispatcher
        .dispatch(product_id)
        .await
        .expect("dispatch pass completes");

    assert_eq!(summary.notified, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(adapters.inbox.for_user(&known).len(), 1);
    assert_eq!(
        adapters.subscriptions.is_delivered(&reachable.id),
        Some(true)
    );
    // The failed subscriber stays pending for the next pass.
    assert_eq!(
        adapters.subscriptions.is_delivered(&unreachable.id),
        Some(false)
    );
}

#[tokio::test]
async fn threshold_alert_fires_once_and_rearms_after_restock() {
    let adapters = Adapters::default();
    let product_id = adapters.products.add("Walking boots", 0);
    let admin = adapters.accounts.add_admin("Morgan Reyes");
    let service = build_vote_service(&adapters, 2);

    cast(&service, product_id, UserId::random()).await;
    cast(&service, product_id, UserId::random()).await;

    let alerts = adapters.inbox.of_kind(NotificationKind::VoteThreshold);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].user_id, admin);

    // Further votes in the same surge stay silent behind the marker.
    cast(&service, product_id, UserId::random()).await;
    assert_eq!(
        adapters.inbox.of_kind(NotificationKind::VoteThreshold).len(),
        1
    );

    let queue = RecordingDispatchQueue::default();
    let coordinator = build_coordinator(&adapters, &queue);
    coordinator
        .handle_signal(restock(product_id, 5))
        .await
        .expect("coordination succeeds");

    // The reset cleared the marker, so the next surge alerts again.
    cast(&service, product_id, UserId::random()).await;
    cast(&service, product_id, UserId::random()).await;
    assert_eq!(
        adapters.inbox.of_kind(NotificationKind::VoteThreshold).len(),
        2
    );
}
