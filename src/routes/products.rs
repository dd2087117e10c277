use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::auth::CurrentUser;
use crate::forms::products::{AddProductForm, UpdateDiscountForm, UpdateSizesForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products;

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::list_catalog(repo.get_ref()) {
        Ok(views) => HttpResponse::Ok().json(views),
        Err(err) => error_response(err),
    }
}

#[get("/products/popular")]
pub async fn popular_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::popular_products(repo.get_ref()) {
        Ok(views) => HttpResponse::Ok().json(views),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), path.into_inner()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(err) => error_response(err),
    }
}

#[post("/admin/products")]
pub async fn add_product(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err),
    }
}

#[patch("/admin/products/{id}/sizes")]
pub async fn update_product_sizes(
    user: CurrentUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateSizesForm>,
) -> impl Responder {
    match products::update_product_sizes(repo.get_ref(), &user, path.into_inner(), form.into_inner())
    {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err),
    }
}

#[patch("/admin/products/{id}/discount")]
pub async fn update_product_discount(
    user: CurrentUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateDiscountForm>,
) -> impl Responder {
    match products::update_product_discount(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err),
    }
}

#[delete("/admin/products/{id}")]
pub async fn delete_product(
    user: CurrentUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::delete_product(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
