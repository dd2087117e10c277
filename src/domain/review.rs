use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a product review.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    /// Unique identifier of the review.
    pub id: i32,
    /// Reviewed product.
    pub product_id: i32,
    /// Author identifier.
    pub user_id: i32,
    /// Author display name, snapshotted at write time.
    pub user_name: String,
    /// Star rating in `[1, 5]`.
    pub rating: i32,
    /// Free-form review text.
    pub comment: String,
    /// Timestamp for when the review was written.
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new review.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Reviewed product.
    pub product_id: i32,
    /// Author identifier.
    pub user_id: i32,
    /// Author display name, snapshotted at write time.
    pub user_name: String,
    /// Star rating in `[1, 5]`.
    pub rating: i32,
    /// Free-form review text.
    pub comment: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewReview {
    /// Build a new review payload with the supplied details and current timestamp.
    pub fn new(
        product_id: i32,
        user_id: i32,
        user_name: impl Into<String>,
        rating: i32,
        comment: impl Into<String>,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            product_id,
            user_id,
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
            updated_at: now,
        }
    }
}
