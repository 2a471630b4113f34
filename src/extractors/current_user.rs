use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::Principal;
use crate::error::AppError;

/// The authenticated principal for this request, extracted from request
/// extensions where the auth guard stored it. Only usable on routes behind
/// the guard; elsewhere it fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl CurrentUser {
    pub fn identity(&self) -> &str {
        &self.0.identity
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(principal.map(CurrentUser).ok_or_else(AppError::unauthorized))
    }
}
