use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one purchased `(product, size)` line.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Product the line referred to; `None` once the product is deleted.
    pub product_id: Option<i32>,
    /// Product name at the moment of purchase.
    pub name_snapshot: String,
    /// Purchased shoe size.
    pub size: i32,
    /// Units purchased.
    pub quantity: i32,
    /// Effective unit price charged, discount applied.
    pub unit_price: i64,
    /// `unit_price * quantity`.
    pub line_total: i64,
}

/// Domain representation of a completed order.
///
/// Orders are append-only: created once by a successful checkout and never
/// mutated afterwards, whatever happens to the source products.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// User who paid for the order.
    pub user_id: i32,
    /// Snapshot lines, in cart order.
    pub items: Vec<OrderItem>,
    /// Sum of the line totals.
    pub total_amount: i64,
    /// Timestamp of the successful payment.
    pub paid_at: NaiveDateTime,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
}
