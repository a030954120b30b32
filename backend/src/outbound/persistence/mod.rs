//! PostgreSQL persistence adapters for the restock coordination ports.

mod diesel_error_mapping;
mod diesel_notification_repository;
mod diesel_product_store;
mod diesel_subscription_repository;
mod diesel_user_directory;
mod diesel_vote_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_product_store::DieselProductStore;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use diesel_vote_repository::DieselVoteRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
