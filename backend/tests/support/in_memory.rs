//! In-memory implementations of the driven ports.
//!
//! These fakes keep real state behind mutexes so integration suites can
//! exercise whole service graphs without PostgreSQL or Redis. They honour
//! the same contracts as the production adapters: duplicate votes and
//! active subscriptions are rejected, counter mutations are atomic under
//! the lock, and the marker store's `try_set` reports a single winner.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use backend::domain::ports::{
    AlertMarkerStore, AlertMarkerStoreError, DispatchEnqueueError, DispatchQueue,
    NotificationRepository, NotificationRepositoryError, Page, ProductStore, ProductStoreError,
    SubscriptionRepository, SubscriptionRepositoryError, UserDirectory, UserDirectoryError,
    VoteCounterStore, VoteCounterStoreError, VoteRepository, VoteRepositoryError,
};
use backend::domain::{
    Notification, NotificationKind, Product, RestockSubscription, StockChange, User, UserId, Vote,
};
use uuid::Uuid;

fn paginate<T>(rows: Vec<T>, page: Page) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect()
}

/// Vote ledger backed by a vector of rows.
#[derive(Clone, Default)]
pub struct InMemoryVoteLedger {
    rows: Arc<Mutex<Vec<Vote>>>,
}

impl InMemoryVoteLedger {
    /// Synchronous row count for assertions.
    pub fn rows_for_product(&self, product_id: &Uuid) -> usize {
        self.rows
            .lock()
            .expect("vote ledger lock")
            .iter()
            .filter(|vote| vote.product_id == *product_id)
            .count()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteLedger {
    async fn insert(&self, vote: &Vote) -> Result<(), VoteRepositoryError> {
        let mut rows = self.rows.lock().expect("vote ledger lock");
        let duplicate = rows
            .iter()
            .any(|row| row.product_id == vote.product_id && row.user_id == vote.user_id);
        if duplicate {
            return Err(VoteRepositoryError::Duplicate);
        }
        rows.push(vote.clone());
        Ok(())
    }

    async fn find_by_id(&self, vote_id: &Uuid) -> Result<Option<Vote>, VoteRepositoryError> {
        let rows = self.rows.lock().expect("vote ledger lock");
        Ok(rows.iter().find(|row| row.id == *vote_id).cloned())
    }

    async fn delete(&self, vote_id: &Uuid) -> Result<bool, VoteRepositoryError> {
        let mut rows = self.rows.lock().expect("vote ledger lock");
        let before = rows.len();
        rows.retain(|row| row.id != *vote_id);
        Ok(rows.len() < before)
    }

    async fn count_for_product(&self, product_id: &Uuid) -> Result<i64, VoteRepositoryError> {
        Ok(self.rows_for_product(product_id) as i64)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let rows = self.rows.lock().expect("vote ledger lock");
        let mut matching: Vec<Vote> = rows
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let rows = self.rows.lock().expect("vote ledger lock");
        let mut matching: Vec<Vote> = rows
            .iter()
            .filter(|row| row.product_id == *product_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn delete_all_for_product(
        &self,
        product_id: &Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        let mut rows = self.rows.lock().expect("vote ledger lock");
        let before = rows.len();
        rows.retain(|row| row.product_id != *product_id);
        Ok((before - rows.len()) as u64)
    }
}

/// Subscription ledger enforcing active uniqueness per pair.
#[derive(Clone, Default)]
pub struct InMemorySubscriptionLedger {
    rows: Arc<Mutex<Vec<RestockSubscription>>>,
}

impl InMemorySubscriptionLedger {
    /// Synchronous delivered-flag lookup for assertions.
    pub fn is_delivered(&self, subscription_id: &Uuid) -> Option<bool> {
        self.rows
            .lock()
            .expect("subscription ledger lock")
            .iter()
            .find(|row| row.id == *subscription_id)
            .map(|row| row.delivered)
    }

    fn set_delivered(&self, subscription_id: &Uuid, delivered: bool) {
        let mut rows = self.rows.lock().expect("subscription ledger lock");
        if let Some(row) = rows.iter_mut().find(|row| row.id == *subscription_id) {
            row.delivered = delivered;
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionLedger {
    async fn insert(
        &self,
        subscription: &RestockSubscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("subscription ledger lock");
        let active_exists = rows.iter().any(|row| {
            row.product_id == subscription.product_id
                && row.user_id == subscription.user_id
                && !row.delivered
        });
        if active_exists {
            return Err(SubscriptionRepositoryError::Duplicate);
        }
        rows.push(subscription.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        subscription_id: &Uuid,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        Ok(rows.iter().find(|row| row.id == *subscription_id).cloned())
    }

    async fn find_active(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        Ok(rows
            .iter()
            .find(|row| {
                row.product_id == *product_id && row.user_id == *user_id && !row.delivered
            })
            .cloned())
    }

    async fn find_delivered(
        &self,
        product_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        Ok(rows
            .iter()
            .filter(|row| {
                row.product_id == *product_id && row.user_id == *user_id && row.delivered
            })
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn mark_delivered(
        &self,
        subscription_id: &Uuid,
    ) -> Result<(), SubscriptionRepositoryError> {
        self.set_delivered(subscription_id, true);
        Ok(())
    }

    async fn reopen(&self, subscription_id: &Uuid) -> Result<(), SubscriptionRepositoryError> {
        self.set_delivered(subscription_id, false);
        Ok(())
    }

    async fn reopen_all_delivered(
        &self,
        product_id: &Uuid,
    ) -> Result<u64, SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("subscription ledger lock");
        let mut reopened = 0u64;
        for row in rows
            .iter_mut()
            .filter(|row| row.product_id == *product_id && row.delivered)
        {
            row.delivered = false;
            reopened += 1;
        }
        Ok(reopened)
    }

    async fn list_pending_for_product(
        &self,
        product_id: &Uuid,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        Ok(rows
            .iter()
            .filter(|row| row.product_id == *product_id && !row.delivered)
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        let mut matching: Vec<RestockSubscription> = rows
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn list_for_product(
        &self,
        product_id: &Uuid,
        page: Page,
    ) -> Result<Vec<RestockSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("subscription ledger lock");
        let mut matching: Vec<RestockSubscription> = rows
            .iter()
            .filter(|row| row.product_id == *product_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn delete(
        &self,
        subscription_id: &Uuid,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("subscription ledger lock");
        let before = rows.len();
        rows.retain(|row| row.id != *subscription_id);
        Ok(rows.len() < before)
    }
}

/// Product shelf with an in-place stock mutation.
#[derive(Clone, Default)]
pub struct InMemoryProductShelf {
    products: Arc<Mutex<HashMap<Uuid, Product>>>,
}

impl InMemoryProductShelf {
    /// Add a product and return its id.
    pub fn add(&self, name: &str, stock: i32) -> Uuid {
        let id = Uuid::new_v4();
        let product = Product {
            id,
            name: name.to_owned(),
            stock,
        };
        self.products
            .lock()
            .expect("product shelf lock")
            .insert(id, product);
        id
    }
}

#[async_trait]
impl ProductStore for InMemoryProductShelf {
    async fn find_by_id(
        &self,
        product_id: &Uuid,
    ) -> Result<Option<Product>, ProductStoreError> {
        let products = self.products.lock().expect("product shelf lock");
        Ok(products.get(product_id).cloned())
    }

    async fn set_stock(
        &self,
        product_id: &Uuid,
        quantity: i32,
    ) -> Result<Option<StockChange>, ProductStoreError> {
        let mut products = self.products.lock().expect("product shelf lock");
        let Some(product) = products.get_mut(product_id) else {
            return Ok(None);
        };
        let previous = product.stock;
        product.stock = quantity;
        Ok(Some(StockChange {
            product_id: *product_id,
            previous,
            current: quantity,
        }))
    }
}

/// Vote counter with a switchable simulated outage.
#[derive(Clone, Default)]
pub struct InMemoryVoteCounter {
    counts: Arc<Mutex<HashMap<Uuid, i64>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryVoteCounter {
    /// Toggle the simulated outage; every operation fails while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Synchronous entry lookup for assertions.
    pub fn entry(&self, product_id: &Uuid) -> Option<i64> {
        self.counts
            .lock()
            .expect("vote counter lock")
            .get(product_id)
            .copied()
    }

    fn check_available(&self) -> Result<(), VoteCounterStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(VoteCounterStoreError::unavailable("simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl VoteCounterStore for InMemoryVoteCounter {
    async fn increment(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        self.check_available()?;
        let mut counts = self.counts.lock().expect("vote counter lock");
        let entry = counts.entry(*product_id).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn decrement(&self, product_id: &Uuid) -> Result<i64, VoteCounterStoreError> {
        self.check_available()?;
        let mut counts = self.counts.lock().expect("vote counter lock");
        let entry = counts.entry(*product_id).or_insert(0);
        *entry -= 1;
        Ok(*entry)
    }

    async fn read(&self, product_id: &Uuid) -> Result<Option<i64>, VoteCounterStoreError> {
        self.check_available()?;
        Ok(self.entry(product_id))
    }

    async fn write(&self, product_id: &Uuid, count: i64) -> Result<(), VoteCounterStoreError> {
        self.check_available()?;
        self.counts
            .lock()
            .expect("vote counter lock")
            .insert(*product_id, count);
        Ok(())
    }

    async fn delete(&self, product_id: &Uuid) -> Result<(), VoteCounterStoreError> {
        self.check_available()?;
        self.counts
            .lock()
            .expect("vote counter lock")
            .remove(product_id);
        Ok(())
    }
}

/// Alert marker store; the set arbitrates concurrent winners.
#[derive(Clone, Default)]
pub struct InMemoryAlertMarkers {
    markers: Arc<Mutex<HashSet<Uuid>>>,
}

impl InMemoryAlertMarkers {
    /// Whether a marker currently exists for the product.
    pub fn is_set(&self, product_id: &Uuid) -> bool {
        self.markers
            .lock()
            .expect("alert marker lock")
            .contains(product_id)
    }
}

#[async_trait]
impl AlertMarkerStore for InMemoryAlertMarkers {
    async fn try_set(
        &self,
        product_id: &Uuid,
        _ttl: Duration,
    ) -> Result<bool, AlertMarkerStoreError> {
        let mut markers = self.markers.lock().expect("alert marker lock");
        Ok(markers.insert(*product_id))
    }

    async fn clear(&self, product_id: &Uuid) -> Result<(), AlertMarkerStoreError> {
        self.markers
            .lock()
            .expect("alert marker lock")
            .remove(product_id);
        Ok(())
    }
}

/// User directory seeded per test.
#[derive(Clone, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Arc<Mutex<Vec<User>>>,
}

impl InMemoryAccountDirectory {
    /// Register a customer account and return its id.
    pub fn add_customer(&self, display_name: &str) -> UserId {
        self.add(display_name, false)
    }

    /// Register an administrative account and return its id.
    pub fn add_admin(&self, display_name: &str) -> UserId {
        self.add(display_name, true)
    }

    fn add(&self, display_name: &str, admin: bool) -> UserId {
        let id = UserId::random();
        self.accounts
            .lock()
            .expect("account directory lock")
            .push(User {
                id,
                display_name: display_name.to_owned(),
                admin,
            });
        id
    }
}

#[async_trait]
impl UserDirectory for InMemoryAccountDirectory {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let accounts = self.accounts.lock().expect("account directory lock");
        Ok(accounts.iter().find(|user| user.id == *user_id).cloned())
    }

    async fn find_admin(&self) -> Result<Option<User>, UserDirectoryError> {
        let accounts = self.accounts.lock().expect("account directory lock");
        Ok(accounts.iter().find(|user| user.admin).cloned())
    }
}

/// Notification inbox recording everything it is asked to persist.
#[derive(Clone, Default)]
pub struct InMemoryNotificationInbox {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationInbox {
    /// All persisted notifications of the given kind.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notification inbox lock")
            .iter()
            .filter(|note| note.kind == kind)
            .cloned()
            .collect()
    }

    /// All persisted notifications for the given recipient.
    pub fn for_user(&self, user_id: &UserId) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notification inbox lock")
            .iter()
            .filter(|note| note.user_id == *user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationInbox {
    async fn create(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        self.notifications
            .lock()
            .expect("notification inbox lock")
            .push(notification.clone());
        Ok(())
    }
}

/// Dispatch queue that records product ids instead of scheduling work.
#[derive(Clone, Default)]
pub struct RecordingDispatchQueue {
    enqueued: Arc<Mutex<Vec<Uuid>>>,
}

impl RecordingDispatchQueue {
    /// Product ids enqueued so far.
    pub fn enqueued(&self) -> Vec<Uuid> {
        self.enqueued.lock().expect("dispatch queue lock").clone()
    }
}

#[async_trait]
impl DispatchQueue for RecordingDispatchQueue {
    async fn enqueue(&self, product_id: Uuid) -> Result<(), DispatchEnqueueError> {
        self.enqueued
            .lock()
            .expect("dispatch queue lock")
            .push(product_id);
        Ok(())
    }
}

/// The full set of in-memory driven adapters for one test.
#[derive(Clone, Default)]
pub struct Adapters {
    pub votes: InMemoryVoteLedger,
    pub subscriptions: InMemorySubscriptionLedger,
    pub products: InMemoryProductShelf,
    pub counter: InMemoryVoteCounter,
    pub markers: InMemoryAlertMarkers,
    pub accounts: InMemoryAccountDirectory,
    pub inbox: InMemoryNotificationInbox,
}
