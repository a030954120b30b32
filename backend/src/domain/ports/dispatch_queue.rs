//! Port for scheduling asynchronous notification dispatch.
//!
//! The queue is the task-submission boundary between the coordinator's
//! synchronous reset and the dispatcher: the coordinator enqueues and
//! returns without waiting, and an enqueue failure must never roll back the
//! reset that preceded it.

use async_trait::async_trait;
use uuid::Uuid;

/// Errors raised by dispatch queue adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchEnqueueError {
    /// The queue is closed; no dispatch worker is running.
    #[error("dispatch queue closed: {message}")]
    QueueClosed {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl DispatchEnqueueError {
    /// Create a queue-closed error with the given message.
    pub fn queue_closed(message: impl Into<String>) -> Self {
        Self::QueueClosed {
            message: message.into(),
        }
    }
}

/// Port for submitting a product's pending subscriptions for dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchQueue: Send + Sync {
    /// Schedule a dispatch pass for the given product. Fire-and-forget.
    async fn enqueue(&self, product_id: Uuid) -> Result<(), DispatchEnqueueError>;
}

/// Fixture queue that discards jobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDispatchQueue;

#[async_trait]
impl DispatchQueue for FixtureDispatchQueue {
    async fn enqueue(&self, _product_id: Uuid) -> Result<(), DispatchEnqueueError> {
        Ok(())
    }
}
