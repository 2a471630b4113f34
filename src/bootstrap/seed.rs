//! Startup seeding.
//!
//! Creates the initial admin account if it does not exist yet, so the very
//! first login is possible on a fresh store. Idempotent across restarts.

use tracing::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::store::{NewUser, UserStore};

pub fn seed_admin(store: &dyn UserStore, email: &str, password: &str) -> Result<(), AppError> {
    if store.find_by_email(email)?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let user = store.create(NewUser {
        email: email.to_string(),
        first_name: None,
        last_name: None,
        password_hash,
    })?;
    info!(user_id = user.id, "seeded initial admin user");
    Ok(())
}
