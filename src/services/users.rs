//! User CRUD operations over the store.

use tracing::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::store::{NewUser, UserPatch, UserRecord, UserStore};

/// Requested changes to a user; plaintext password is hashed here so it
/// never reaches the store.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

pub fn list_users(store: &dyn UserStore) -> Result<Vec<UserRecord>, AppError> {
    store.list()
}

pub fn get_user(store: &dyn UserStore, id: i64) -> Result<UserRecord, AppError> {
    store
        .get(id)?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", format!("User {id} not found")))
}

pub fn create_user(
    store: &dyn UserStore,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    password: &str,
) -> Result<UserRecord, AppError> {
    let password_hash = hash_password(password)?;
    let user = store.create(NewUser {
        email,
        first_name,
        last_name,
        password_hash,
    })?;
    info!(user_id = user.id, "user created");
    Ok(user)
}

pub fn update_user(
    store: &dyn UserStore,
    id: i64,
    changes: UserChanges,
) -> Result<UserRecord, AppError> {
    let password_hash = match changes.password.as_deref() {
        Some(plaintext) => Some(hash_password(plaintext)?),
        None => None,
    };

    let patch = UserPatch {
        email: changes.email,
        first_name: changes.first_name,
        last_name: changes.last_name,
        password_hash,
    };

    let user = store
        .update(id, patch)?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", format!("User {id} not found")))?;
    info!(user_id = user.id, "user updated");
    Ok(user)
}

pub fn delete_user(store: &dyn UserStore, id: i64) -> Result<(), AppError> {
    if !store.delete(id)? {
        return Err(AppError::not_found(
            "USER_NOT_FOUND",
            format!("User {id} not found"),
        ));
    }
    info!(user_id = id, "user deleted");
    Ok(())
}
