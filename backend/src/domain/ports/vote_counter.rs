//! Port for the live vote counter store.
//!
//! The counter is a performance optimisation, never a source of truth.
//! Mutations must be the store's native atomic primitives, not caller-side
//! read-modify-write pairs, because many workers across many processes vote
//! on the same product concurrently. Callers recover from every error here
//! by falling back to the vote ledger.

use async_trait::async_trait;
use uuid::Uuid;

/// Errors raised by vote counter store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteCounterStoreError {
    /// The store is unreachable or the operation timed out.
    #[error("vote counter store unavailable: {message}")]
    Unavailable {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The stored entry exists but is not parseable as an integer.
    #[error("vote counter entry corrupt: {message}")]
    Corrupt {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl VoteCounterStoreError {
    /// Create an unavailability error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a corruption error with the given message.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

/// Port for the per-product live vote counter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCounterStore: Send + Sync {
    /// Atomically increment the counter, returning the new value.
    async fn increment(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError>;

    /// Atomically decrement the counter, returning the new value.
    async fn decrement(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError>;

    /// Read the counter. `None` means the entry is absent, which callers
    /// must treat as "unknown", not zero.
    async fn read(&self, product_id: &Uuid) -> Result<Option<i64>, VoteCounterStoreError>;

    /// Overwrite the counter with an authoritative ledger count.
    async fn write(&self, product_id: &Uuid, count: i64) -> Result<(), VoteCounterStoreError>;

    /// Remove the counter entry outright.
    ///
    /// Used by the restock reset: the next read misses and repopulates from
    /// the now-empty ledger instead of trusting decrement arithmetic.
    async fn delete(&self, product_id: &Uuid) -> Result<(), VoteCounterStoreError>;
}

/// Fixture store that is always empty and accepts every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCounterStore;

#[async_trait]
impl VoteCounterStore for FixtureVoteCounterStore {
    async fn increment(&self, _product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        Ok(1)
    }

    async fn decrement(&self, _product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        Ok(0)
    }

    async fn read(&self, _product_id: &Uuid) -> Result<Option<i64>, VoteCounterStoreError> {
        Ok(None)
    }

    async fn write(&self, _product_id: &Uuid, _count: i64) -> Result<(), VoteCounterStoreError> {
        Ok(())
    }

    async fn delete(&self, _product_id: &Uuid) -> Result<(), VoteCounterStoreError> {
        Ok(())
    }
}
