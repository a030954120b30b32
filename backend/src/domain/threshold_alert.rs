//! Administrative vote-threshold alerting.
//!
//! After each successful vote the updated count is checked against a fixed
//! threshold. Crossings raise one administrative notification per dedup
//! window; the marker store's atomic set-if-absent decides the single
//! winner even when many votes land concurrently at or past the threshold.
//! Nothing in here may fail the vote that triggered it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::ports::{
    AlertMarkerStore, NotificationRepository, ProductStore, UserDirectory,
};
use crate::domain::Notification;

/// Default vote count at which the admin is alerted.
pub const DEFAULT_VOTE_ALERT_THRESHOLD: i64 = 50;

/// Default dedup marker lifetime.
pub const DEFAULT_ALERT_MARKER_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One-time admin alert raiser for vote surges.
#[derive(Clone)]
pub struct ThresholdAlerter {
    markers: Arc<dyn AlertMarkerStore>,
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductStore>,
    threshold: i64,
    marker_ttl: Duration,
}

impl ThresholdAlerter {
    /// Create an alerter over its driven ports.
    pub fn new(
        markers: Arc<dyn AlertMarkerStore>,
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserDirectory>,
        products: Arc<dyn ProductStore>,
        threshold: i64,
        marker_ttl: Duration,
    ) -> Self {
        Self {
            markers,
            notifications,
            users,
            products,
            threshold,
            marker_ttl,
        }
    }

    /// Raise the admin alert when `count` has reached the threshold and no
    /// alert was raised in the current dedup window.
    ///
    /// Every failure path logs and returns; the surrounding vote must never
    /// observe an error from here.
    pub async fn maybe_alert(&self, product_id: Uuid, count: i64) {
        if count < self.threshold {
            return;
        }

        match self.markers.try_set(&product_id, self.marker_ttl).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                warn!(%product_id, error = %err, "alert marker unavailable; skipping admin alert");
                return;
            }
        }

        let admin = match self.users.find_admin().await {
            Ok(Some(admin)) => admin,
            Ok(None) => {
                warn!(%product_id, "no administrative account exists; skipping vote threshold alert");
                return;
            }
            Err(err) => {
                warn!(%product_id, error = %err, "admin lookup failed; skipping vote threshold alert");
                return;
            }
        };

        let product_name = match self.products.find_by_id(&product_id).await {
            Ok(Some(product)) => product.name,
            Ok(None) | Err(_) => product_id.to_string(),
        };

        let alert = Notification::vote_threshold(admin.id, &product_name, count);
        if let Err(err) = self.notifications.create(&alert).await {
            error!(%product_id, error = %err, "failed to persist vote threshold alert");
            // Release the marker so a later vote can retry the alert.
            if let Err(clear_err) = self.markers.clear(&product_id).await {
                warn!(%product_id, error = %clear_err, "failed to release alert marker");
            }
        }
    }
}

#[cfg(test)]
#[path = "threshold_alert_tests.rs"]
mod tests;
