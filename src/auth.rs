//! Session-backed identity.
//!
//! Login itself is handled by an external flow that writes the signed session
//! cookie; this module only reads it back and hands the identity to services
//! as an explicit value.

use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Session key under which the authenticated user is stored.
pub const SESSION_USER_KEY: &str = "user";

/// Role carried in the session cookie.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Customer
    }
}

/// The caller's identity as resolved from the session cookie.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    /// Unique identifier of the user.
    pub id: i32,
    /// Display name, snapshotted into reviews.
    pub name: String,
    /// Role used for admin-only operations.
    pub role: Role,
}

impl CurrentUser {
    /// Whether the user may perform admin operations.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        let user = match session.get::<CurrentUser>(SESSION_USER_KEY) {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(unauthorized_error()),
            Err(err) => {
                log::warn!("Failed to deserialize session user: {err}");
                Err(unauthorized_error())
            }
        };
        ready(user)
    }
}

fn unauthorized_error() -> Error {
    let response = HttpResponse::Unauthorized().json(json!({"message": "Login required."}));
    actix_web::error::InternalError::from_response("unauthorized", response).into()
}
