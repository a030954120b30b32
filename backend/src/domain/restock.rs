//! Restock signal value type and the edge-trigger predicate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ephemeral event emitted when a product's stock changes.
///
/// The signal is published only after the stock-mutating transaction has
/// committed; the coordinator never observes a change that could still roll
/// back. It is not persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockSignal {
    /// Product whose stock changed.
    pub product_id: Uuid,
    /// Stock quantity before the committed mutation.
    pub previous_stock: i32,
    /// Stock quantity after the committed mutation.
    pub current_stock: i32,
}

impl RestockSignal {
    /// Whether this change is a true restock.
    ///
    /// A restock is the strict 0→positive edge. Replenishing an already
    /// stocked product, selling out, or a no-op zero write all return false
    /// and must not trigger the coordinator.
    pub const fn is_restock(&self) -> bool {
        self.previous_stock == 0 && self.current_stock > 0
    }
}
