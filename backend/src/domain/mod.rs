//! Domain entities, services, and ports for restock coordination.
//!
//! Everything in here is transport and storage agnostic: services depend on
//! the port traits in [`ports`], and adapters under `outbound`/`inbound`
//! supply the concrete I/O.

pub mod error;
pub mod notification;
pub mod ports;
pub mod product;
pub mod restock;
pub mod subscription;
pub mod user;
pub mod vote;

mod dispatch_service;
mod restock_coordinator;
mod stock_service;
mod subscription_service;
mod threshold_alert;
mod vote_service;

pub use self::dispatch_service::NotificationDispatchService;
pub use self::error::{Error, ErrorCode};
pub use self::notification::{Notification, NotificationKind};
pub use self::product::{Product, StockChange};
pub use self::restock::RestockSignal;
pub use self::restock_coordinator::RestockCoordinatorService;
pub use self::stock_service::StockUpdateService;
pub use self::subscription::RestockSubscription;
pub use self::subscription_service::SubscriptionService;
pub use self::threshold_alert::{
    ThresholdAlerter, DEFAULT_ALERT_MARKER_TTL, DEFAULT_VOTE_ALERT_THRESHOLD,
};
pub use self::user::{User, UserId};
pub use self::vote::Vote;
pub use self::vote_service::VoteService;
