use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post};
use serde_json::json;

use crate::auth::CurrentUser;

#[get("/auth/me")]
pub async fn me(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user)
}

#[post("/auth/logout")]
pub async fn logout(user: CurrentUser, session: Session) -> impl Responder {
    session.purge();
    log::info!("User {} logged out", user.id);
    HttpResponse::Ok().json(json!({"message": "Logged out."}))
}
