//! Port for publishing restock signals.
//!
//! The publisher is the commit-synchronous boundary between the stock
//! update path and the coordinator: it must only be invoked after the stock
//! mutation has durably committed, and it must never call into reset logic
//! directly.

use async_trait::async_trait;

use crate::domain::RestockSignal;

/// Errors raised by restock signal publishers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestockPublishError {
    /// The signal channel is closed; no coordinator is listening.
    #[error("restock signal channel closed: {message}")]
    ChannelClosed {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl RestockPublishError {
    /// Create a channel-closed error with the given message.
    pub fn channel_closed(message: impl Into<String>) -> Self {
        Self::ChannelClosed {
            message: message.into(),
        }
    }
}

/// Port for handing a committed stock change to the coordinator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestockSignalPublisher: Send + Sync {
    /// Publish a signal describing an already committed stock change.
    async fn publish(&self, signal: RestockSignal) -> Result<(), RestockPublishError>;
}

/// Fixture publisher that drops signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestockSignalPublisher;

#[async_trait]
impl RestockSignalPublisher for FixtureRestockSignalPublisher {
    async fn publish(&self, _signal: RestockSignal) -> Result<(), RestockPublishError> {
        Ok(())
    }
}
