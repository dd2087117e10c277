use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One `(product, size)` line in a user's cart.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartItem {
    /// Unique identifier of the line.
    pub id: i32,
    /// Product the line refers to.
    pub product_id: i32,
    /// Selected shoe size.
    pub size: i32,
    /// Units requested, at least 1.
    pub quantity: i32,
    /// Display snapshot of the effective unit price at last recompute.
    pub unit_price: i64,
    /// Display snapshot of `unit_price * quantity` at last recompute.
    pub line_total: i64,
}

/// Domain representation of a user's cart.
///
/// `unit_price`/`line_total` on the lines are previews recomputed from
/// current product state on every mutation; what gets charged is snapshotted
/// again inside the checkout transaction.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Cart {
    /// Unique identifier of the cart.
    pub id: i32,
    /// Owning user identifier (one cart per user).
    pub user_id: i32,
    /// Current lines, oldest first.
    pub items: Vec<CartItem>,
    /// Timestamp for when the cart record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the cart record.
    pub updated_at: NaiveDateTime,
}

impl Cart {
    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the line total previews.
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.line_total).sum()
    }

    /// The line for `(product_id, size)`, if present.
    pub fn find_line(&self, product_id: i32, size: i32) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id && item.size == size)
    }
}
