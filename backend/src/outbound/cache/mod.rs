//! Redis adapters for the live vote counter and admin alert marker.
//!
//! A single bb8 pool over one Redis instance backs both ports. All
//! mutations use Redis-native atomic primitives (`INCR`, `DECR`,
//! `SET ... NX EX`) so concurrent workers never race through
//! read-modify-write cycles.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{self, AsyncCommands};
use bb8_redis::{bb8, RedisConnectionManager};
use uuid::Uuid;

use crate::domain::ports::{
    AlertMarkerStore, AlertMarkerStoreError, VoteCounterStore, VoteCounterStoreError,
};

/// Key for a product's live vote counter.
fn vote_count_key(product_id: &Uuid) -> String {
    format!("restock:vote:count:{product_id}")
}

/// Key for a product's admin alert dedup marker.
fn alert_marker_key(product_id: &Uuid) -> String {
    format!("restock:admin:notified:{product_id}")
}

/// Errors raised while establishing the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedisCacheError {
    /// The Redis URL was rejected or the pool could not be built.
    #[error("failed to initialise redis cache: {message}")]
    Initialisation {
        /// Underlying client failure description.
        message: String,
    },
}

impl RedisCacheError {
    /// Create an initialisation error with the given message.
    pub fn initialisation(message: impl Into<String>) -> Self {
        Self::Initialisation {
            message: message.into(),
        }
    }
}

/// Shared Redis connection pool implementing both cache-side ports.
#[derive(Clone)]
pub struct RedisRestockCache {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl std::fmt::Debug for RedisRestockCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRestockCache").finish_non_exhaustive()
    }
}

impl RedisRestockCache {
    /// Build a pooled client for the given Redis URL.
    ///
    /// # Errors
    ///
    /// Returns [`RedisCacheError::Initialisation`] when the URL is invalid
    /// or the pool cannot be constructed.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisCacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| RedisCacheError::initialisation(err.to_string()))?;

        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|err| RedisCacheError::initialisation(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn counter_conn(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, VoteCounterStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))
    }

    async fn marker_conn(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, AlertMarkerStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| AlertMarkerStoreError::unavailable(err.to_string()))
    }
}

#[async_trait]
impl VoteCounterStore for RedisRestockCache {
    async fn increment(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        let mut conn = self.counter_conn().await?;
        conn.incr(vote_count_key(product_id), 1_i64)
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))
    }

    async fn decrement(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        let mut conn = self.counter_conn().await?;
        conn.decr(vote_count_key(product_id), 1_i64)
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))
    }

    async fn read(&self, product_id: &Uuid) -> Result<Option<i64>, VoteCounterStoreError> {
        let mut conn = self.counter_conn().await?;

        // Fetch as a string so an unparseable entry is distinguishable from
        // a transport failure.
        let raw: Option<String> = conn
            .get(vote_count_key(product_id))
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))?;

        raw.map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| VoteCounterStoreError::corrupt(format!("not an integer: {value:?}")))
        })
        .transpose()
    }

    async fn write(&self, product_id: &Uuid, count: i64) -> Result<(), VoteCounterStoreError> {
        let mut conn = self.counter_conn().await?;
        conn.set(vote_count_key(product_id), count)
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))
    }

    async fn delete(&self, product_id: &Uuid) -> Result<(), VoteCounterStoreError> {
        let mut conn = self.counter_conn().await?;
        conn.del(vote_count_key(product_id))
            .await
            .map_err(|err| VoteCounterStoreError::unavailable(err.to_string()))
    }
}

#[async_trait]
impl AlertMarkerStore for RedisRestockCache {
    async fn try_set(
        &self,
        product_id: &Uuid,
        ttl: Duration,
    ) -> Result<bool, AlertMarkerStoreError> {
        let mut conn = self.marker_conn().await?;

        // SET NX EX replies OK when this caller created the marker and nil
        // when it already existed.
        let reply: Option<String> = redis::cmd("SET")
            .arg(alert_marker_key(product_id))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async(&mut *conn)
            .await
            .map_err(|err| AlertMarkerStoreError::unavailable(err.to_string()))?;

        Ok(reply.is_some())
    }

    async fn clear(&self, product_id: &Uuid) -> Result<(), AlertMarkerStoreError> {
        let mut conn = self.marker_conn().await?;
        conn.del(alert_marker_key(product_id))
            .await
            .map_err(|err| AlertMarkerStoreError::unavailable(err.to_string()))
    }
}
