//! Outbound adapters: PostgreSQL persistence, the Redis cache, and the
//! in-process channels that carry restock work between tasks.

pub mod cache;
pub mod channel;
pub mod persistence;
