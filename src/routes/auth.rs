use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Handle login: check credentials and return a signed access token.
/// The token comes back as the raw response body.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = auth::login(
        &*app_state.users,
        &app_state.security,
        &req.username,
        &req.password,
    )?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(token))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/login").route(web::post().to(login)));
}
