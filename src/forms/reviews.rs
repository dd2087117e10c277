use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::auth::CurrentUser;
use crate::domain::review::NewReview;

/// Maximum allowed length for a review comment.
const COMMENT_MAX_LEN: u64 = 2000;

/// Errors that can occur while processing review forms.
#[derive(Debug, Error)]
pub enum ReviewFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The comment is empty after trimming.
    #[error("review comment cannot be empty")]
    EmptyComment,
}

/// JSON payload for writing a review.
#[derive(Debug, Deserialize, Validate)]
pub struct WriteReviewForm {
    /// Reviewed product.
    pub product_id: i32,
    /// Star rating in `[1, 5]`.
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    /// Free-form review text.
    #[validate(length(min = 1, max = COMMENT_MAX_LEN))]
    pub comment: String,
}

impl WriteReviewForm {
    /// Validates the payload into a domain `NewReview` authored by `user`.
    pub fn into_new_review(self, user: &CurrentUser) -> Result<NewReview, ReviewFormError> {
        self.validate()?;

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ReviewFormError::EmptyComment);
        }

        Ok(NewReview::new(
            self.product_id,
            user.id,
            user.name.as_str(),
            self.rating,
            comment,
        ))
    }
}
