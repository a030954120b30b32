//! Domain ports and supporting types for the hexagonal boundary.

mod alert_marker;
mod coordinator;
mod dispatch_queue;
mod dispatcher;
mod notification_repository;
mod page;
mod product_store;
mod restock_publisher;
mod stock_commands;
mod subscription_commands;
mod subscription_repository;
mod user_directory;
mod vote_commands;
mod vote_counter;
mod vote_repository;

#[cfg(test)]
pub use alert_marker::MockAlertMarkerStore;
pub use alert_marker::{AlertMarkerStore, AlertMarkerStoreError, FixtureAlertMarkerStore};
#[cfg(test)]
pub use coordinator::MockRestockCoordinator;
pub use coordinator::RestockCoordinator;
#[cfg(test)]
pub use dispatch_queue::MockDispatchQueue;
pub use dispatch_queue::{DispatchEnqueueError, DispatchQueue, FixtureDispatchQueue};
#[cfg(test)]
pub use dispatcher::MockRestockDispatcher;
pub use dispatcher::{DispatchSummary, RestockDispatcher};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
pub use page::Page;
#[cfg(test)]
pub use product_store::MockProductStore;
pub use product_store::{FixtureProductStore, ProductStore, ProductStoreError};
#[cfg(test)]
pub use restock_publisher::MockRestockSignalPublisher;
pub use restock_publisher::{
    FixtureRestockSignalPublisher, RestockPublishError, RestockSignalPublisher,
};
#[cfg(test)]
pub use stock_commands::MockStockCommand;
pub use stock_commands::{StockCommand, StockUpdateOutcome};
#[cfg(test)]
pub use subscription_commands::{MockSubscriptionCommand, MockSubscriptionQuery};
pub use subscription_commands::{
    SubscribeRequest, SubscriptionCommand, SubscriptionQuery, UnsubscribeRequest,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use vote_commands::{MockVoteCommand, MockVoteQuery};
pub use vote_commands::{CancelVoteRequest, CastVoteRequest, VoteCommand, VoteQuery};
#[cfg(test)]
pub use vote_counter::MockVoteCounterStore;
pub use vote_counter::{FixtureVoteCounterStore, VoteCounterStore, VoteCounterStoreError};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{FixtureVoteRepository, VoteRepository, VoteRepositoryError};
