use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod reviews;

/// Translate a service failure into the JSON error response the frontends
/// expect.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Forbidden => {
            HttpResponse::Forbidden().json(json!({"message": "Admin access required."}))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(json!({"message": "Not found."}))
        }
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(json!({"message": message}))
        }
        ServiceError::SizeNotOffered => HttpResponse::BadRequest()
            .json(json!({"message": "The selected size is not offered."})),
        ServiceError::SoldOut => {
            HttpResponse::Conflict().json(json!({"message": "This size is sold out."}))
        }
        ServiceError::InsufficientStock { available } => HttpResponse::Conflict().json(json!({
            "message": format!("Not enough stock left ({available} remaining).")
        })),
        ServiceError::NotPurchased => HttpResponse::BadRequest()
            .json(json!({"message": "Only purchased products can be reviewed."})),
        ServiceError::Repository(err) => {
            log::error!("Repository failure: {err}");
            HttpResponse::InternalServerError().json(json!({"message": "Internal server error."}))
        }
    }
}
