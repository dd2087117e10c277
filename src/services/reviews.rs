use crate::auth::CurrentUser;
use crate::domain::review::Review;
use crate::forms::reviews::WriteReviewForm;
use crate::repository::{OrderReader, ReviewReader, ReviewWriter};
use crate::services::{ServiceError, ServiceResult};

/// All reviews for a product, newest first.
pub fn product_reviews<R>(repo: &R, product_id: i32) -> ServiceResult<Vec<Review>>
where
    R: ReviewReader + ?Sized,
{
    Ok(repo.list_reviews(product_id)?)
}

/// Writes a review. Only users who actually bought the product may review it,
/// checked against the order ledger.
pub fn write_review<R>(repo: &R, user: &CurrentUser, form: WriteReviewForm) -> ServiceResult<Review>
where
    R: ReviewWriter + OrderReader + ?Sized,
{
    let payload = form
        .into_new_review(user)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if !repo.user_has_purchased(user.id, payload.product_id)? {
        return Err(ServiceError::NotPurchased);
    }

    Ok(repo.create_review(&payload)?)
}
