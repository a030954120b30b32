//! Row types bridging Diesel and the domain model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Notification, Product, RestockSubscription, User, UserId, Vote};

use super::schema::{notifications, products, restock_subscriptions, restock_votes, users};

/// Row read from the `restock_votes` ledger.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restock_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VoteRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
        }
    }
}

/// Insertable form of a vote.
#[derive(Debug, Insertable)]
#[diesel(table_name = restock_votes)]
pub struct NewVoteRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Vote> for NewVoteRow {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id,
            product_id: vote.product_id,
            user_id: *vote.user_id.as_uuid(),
            created_at: vote.created_at,
        }
    }
}

/// Row read from the `restock_subscriptions` ledger.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restock_subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for RestockSubscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            user_id: UserId::from_uuid(row.user_id),
            delivered: row.delivered,
            created_at: row.created_at,
        }
    }
}

/// Insertable form of a subscription.
#[derive(Debug, Insertable)]
#[diesel(table_name = restock_subscriptions)]
pub struct NewSubscriptionRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&RestockSubscription> for NewSubscriptionRow {
    fn from(subscription: &RestockSubscription) -> Self {
        Self {
            id: subscription.id,
            product_id: subscription.product_id,
            user_id: *subscription.user_id.as_uuid(),
            delivered: subscription.delivered,
            created_at: subscription.created_at,
        }
    }
}

/// Insertable form of a notification.
///
/// Notifications are write-only from this subsystem; the inbox read surface
/// belongs to the wider storefront.
#[derive(Debug, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NewNotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            user_id: *notification.user_id.as_uuid(),
            kind: notification.kind.as_str().to_owned(),
            body: notification.body.clone(),
            created_at: notification.created_at,
        }
    }
}

/// Row read from the `products` catalogue table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            stock: row.stock,
        }
    }
}

/// Row read from the `users` account table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            display_name: row.display_name,
            admin: row.admin,
        }
    }
}
