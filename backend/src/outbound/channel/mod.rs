//! In-process channel adapters for the restock signal bus and dispatch
//! queue.
//!
//! Both are unbounded mpsc channels consumed by dedicated worker tasks, so
//! request handlers hand work off without blocking and a slow dispatch
//! never backs up a stock update.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{
    DispatchEnqueueError, DispatchQueue, RestockCoordinator, RestockDispatcher,
    RestockPublishError, RestockSignalPublisher,
};
use crate::domain::RestockSignal;

/// Publisher half of the restock signal bus.
#[derive(Clone)]
pub struct ChannelRestockSignalPublisher {
    sender: mpsc::UnboundedSender<RestockSignal>,
}

/// Create the restock signal bus, returning the publisher and the receiver
/// the coordinator worker consumes.
pub fn restock_signal_channel() -> (
    ChannelRestockSignalPublisher,
    mpsc::UnboundedReceiver<RestockSignal>,
) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelRestockSignalPublisher { sender }, receiver)
}

#[async_trait]
impl RestockSignalPublisher for ChannelRestockSignalPublisher {
    async fn publish(&self, signal: RestockSignal) -> Result<(), RestockPublishError> {
        self.sender
            .send(signal)
            .map_err(|err| RestockPublishError::channel_closed(err.to_string()))
    }
}

/// Producer half of the notification dispatch queue.
#[derive(Clone)]
pub struct ChannelDispatchQueue {
    sender: mpsc::UnboundedSender<Uuid>,
}

/// Create the dispatch queue, returning the producer and the receiver the
/// dispatch worker consumes.
pub fn dispatch_queue_channel() -> (ChannelDispatchQueue, mpsc::UnboundedReceiver<Uuid>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelDispatchQueue { sender }, receiver)
}

#[async_trait]
impl DispatchQueue for ChannelDispatchQueue {
    async fn enqueue(&self, product_id: Uuid) -> Result<(), DispatchEnqueueError> {
        self.sender
            .send(product_id)
            .map_err(|err| DispatchEnqueueError::queue_closed(err.to_string()))
    }
}

/// Spawn the worker that drains the signal bus into the coordinator.
///
/// Runs until every publisher handle is dropped. Coordination failures are
/// logged and the worker moves on to the next signal.
pub fn spawn_coordinator_worker(
    coordinator: Arc<dyn RestockCoordinator>,
    mut receiver: mpsc::UnboundedReceiver<RestockSignal>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(signal) = receiver.recv().await {
            if let Err(err) = coordinator.handle_signal(signal).await {
                error!(
                    product_id = %signal.product_id,
                    error = %err,
                    "restock coordination failed"
                );
            }
        }
        info!("restock signal bus closed; coordinator worker stopping");
    })
}

/// Spawn the worker that drains the dispatch queue into the dispatcher.
pub fn spawn_dispatch_worker(
    dispatcher: Arc<dyn RestockDispatcher>,
    mut receiver: mpsc::UnboundedReceiver<Uuid>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(product_id) = receiver.recv().await {
            match dispatcher.dispatch(product_id).await {
                Ok(summary) => info!(
                    %product_id,
                    notified = summary.notified,
                    failed = summary.failed,
                    "restock dispatch batch finished"
                ),
                Err(err) => error!(%product_id, error = %err, "restock dispatch batch failed"),
            }
        }
        info!("dispatch queue closed; dispatch worker stopping");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{DispatchSummary, MockRestockCoordinator, MockRestockDispatcher};

    fn signal(product_id: Uuid) -> RestockSignal {
        RestockSignal {
            product_id,
            previous_stock: 0,
            current_stock: 4,
        }
    }

    #[tokio::test]
    async fn published_signals_reach_the_coordinator() {
        let product_id = Uuid::new_v4();
        let (publisher, receiver) = restock_signal_channel();

        let mut coordinator = MockRestockCoordinator::new();
        coordinator
            .expect_handle_signal()
            .withf(move |s| s.product_id == product_id)
            .times(1)
            .returning(|_| Ok(()));

        let worker = spawn_coordinator_worker(Arc::new(coordinator), receiver);

        publisher
            .publish(signal(product_id))
            .await
            .expect("publish succeeds while the worker runs");

        drop(publisher);
        worker.await.expect("worker drains the bus and stops");
    }

    #[tokio::test]
    async fn publish_after_worker_shutdown_reports_a_closed_channel() {
        let (publisher, receiver) = restock_signal_channel();
        drop(receiver);

        let error = publisher
            .publish(signal(Uuid::new_v4()))
            .await
            .expect_err("closed bus rejects the signal");
        assert!(matches!(error, RestockPublishError::ChannelClosed { .. }));
    }

    #[tokio::test]
    async fn enqueued_products_reach_the_dispatcher() {
        let product_id = Uuid::new_v4();
        let (queue, receiver) = dispatch_queue_channel();

        let mut dispatcher = MockRestockDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(move |id| *id == product_id)
            .times(1)
            .returning(|_| {
                Ok(DispatchSummary {
                    notified: 1,
                    failed: 0,
                })
            });

        let worker = spawn_dispatch_worker(Arc::new(dispatcher), receiver);

        queue
            .enqueue(product_id)
            .await
            .expect("enqueue succeeds while the worker runs");

        drop(queue);
        worker.await.expect("worker drains the queue and stops");
    }

    #[tokio::test]
    async fn a_failing_batch_does_not_stop_the_worker() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let (queue, receiver) = dispatch_queue_channel();

        let mut dispatcher = MockRestockDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(move |id| *id == first)
            .times(1)
            .returning(|_| Err(crate::domain::Error::internal("batch exploded")));
        dispatcher
            .expect_dispatch()
            .withf(move |id| *id == second)
            .times(1)
            .returning(|_| Ok(DispatchSummary::default()));

        let worker = spawn_dispatch_worker(Arc::new(dispatcher), receiver);

        queue.enqueue(first).await.expect("first enqueue");
        queue.enqueue(second).await.expect("second enqueue");

        drop(queue);
        worker.await.expect("worker survives a failed batch");
    }
}
