//! Product collaborator model.
//!
//! Catalogue persistence is owned elsewhere; the restock subsystem only
//! reads the product record and mutates its stock through the
//! [`crate::domain::ports::ProductStore`] port.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogue product as seen by the restock subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable catalogue identifier.
    pub id: Uuid,
    /// Display name used in notification content.
    pub name: String,
    /// Current stock quantity; never negative.
    pub stock: i32,
}

/// The committed before/after pair produced by a stock mutation.
///
/// Returned by the product store once the mutating transaction has
/// committed, so observers never act on state that could still roll back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockChange {
    /// Product whose stock changed.
    pub product_id: Uuid,
    /// Stock quantity before the mutation.
    pub previous: i32,
    /// Stock quantity after the mutation.
    pub current: i32,
}
