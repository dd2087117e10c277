use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::auth::CurrentUser;
use crate::forms::cart::{AddCartItemForm, UpdateCartItemForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::cart;

#[get("/cart")]
pub async fn show_cart(user: CurrentUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match cart::get_cart(repo.get_ref(), &user) {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response(err),
    }
}

#[post("/cart/add")]
pub async fn add_cart_item(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCartItemForm>,
) -> impl Responder {
    match cart::add_to_cart(repo.get_ref(), &user, form.into_inner()) {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response(err),
    }
}

#[patch("/cart/item")]
pub async fn update_cart_item(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCartItemForm>,
) -> impl Responder {
    match cart::update_cart_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response(err),
    }
}

// Registered before `remove_cart_item` so "clear" is not parsed as an item id.
#[delete("/cart/clear")]
pub async fn clear_cart(user: CurrentUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match cart::clear_cart(repo.get_ref(), &user) {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response(err),
    }
}

#[delete("/cart/{item_id}")]
pub async fn remove_cart_item(
    user: CurrentUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart::remove_cart_item(repo.get_ref(), &user, path.into_inner()) {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response(err),
    }
}
