use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::CurrentUser;
use crate::repository::{CheckoutError, DieselRepository};
use crate::routes::error_response;
use crate::services::{checkout, orders};

#[post("/orders/checkout")]
pub async fn checkout_cart(user: CurrentUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match checkout::checkout(repo.get_ref(), &user) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(CheckoutError::EmptyCart) => {
            HttpResponse::BadRequest().json(json!({"message": "Your cart is empty."}))
        }
        Err(CheckoutError::InvalidCartItem) => {
            HttpResponse::BadRequest().json(json!({"message": "Your cart contains an invalid item."}))
        }
        Err(CheckoutError::OutOfStock) => HttpResponse::Conflict()
            .json(json!({"message": "One or more sizes are sold out or low on stock."})),
        Err(CheckoutError::Repository(err)) => {
            log::error!("Checkout failed for user {}: {err}", user.id);
            HttpResponse::InternalServerError().json(json!({"message": "Payment failed."}))
        }
    }
}

#[get("/orders/me")]
pub async fn my_orders(user: CurrentUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match orders::my_orders(repo.get_ref(), &user) {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => error_response(err),
    }
}
