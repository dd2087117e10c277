use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::CurrentUser;
use crate::forms::reviews::WriteReviewForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::reviews;

#[get("/reviews/product/{product_id}")]
pub async fn product_reviews(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews::product_reviews(repo.get_ref(), path.into_inner()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err),
    }
}

#[post("/reviews/write")]
pub async fn write_review(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<WriteReviewForm>,
) -> impl Responder {
    match reviews::write_review(repo.get_ref(), &user, form.into_inner()) {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => error_response(err),
    }
}
