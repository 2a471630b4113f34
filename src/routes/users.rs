use actix_web::{web, HttpResponse, Result};
use lazy_regex::regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::users::{self, UserChanges};
use crate::state::app_state::AppState;
use crate::store::UserRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[serde(default)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Wire shape for a user; the password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !regex!(r"^[^@\s]+@[^@\s]+$").is_match(email) {
        return Err(AppError::validation(
            "INVALID_EMAIL",
            "Email address is not valid".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 3 {
        return Err(AppError::validation(
            "PASSWORD_TOO_SHORT",
            "Password must be at least 3 characters".to_string(),
        ));
    }
    Ok(())
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = users::list_users(&*app_state.users)?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok()
        .insert_header(("X-Total-Count", body.len().to_string()))
        .json(body))
}

async fn get(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::get_user(&*app_state.users, path.into_inner())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn create(
    req: web::Json<UserCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = users::create_user(
        &*app_state.users,
        req.email,
        req.first_name,
        req.last_name,
        &req.password,
    )?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

async fn update(
    path: web::Path<i64>,
    req: web::Json<UserUpdateRequest>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let req = req.into_inner();

    if let Some(email) = req.email.as_deref() {
        validate_email(email)?;
    }
    if let Some(password) = req.password.as_deref() {
        validate_password(password)?;
    }

    info!(actor = %current_user.identity(), user_id = id, "profile update");

    let changes = UserChanges {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
    };
    let user = users::update_user(&*app_state.users, id, changes)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn delete(
    path: web::Path<i64>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    info!(actor = %current_user.identity(), user_id = id, "account deletion");

    users::delete_user(&*app_state.users, id)?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get))
            .route(web::put().to(update))
            .route(web::delete().to(delete)),
    );
}
