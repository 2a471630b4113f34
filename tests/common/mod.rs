#![allow(dead_code)]

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::web;
use taskboard::auth::password::hash_password;
use taskboard::store::memory::MemoryUsers;
use taskboard::store::{NewUser, UserRecord, UserStore};
use taskboard::{mint_access_token, AppState, KeyMaterial, SecurityConfig};

/// Shared per-test state: a fresh in-memory store and a fresh keypair.
pub struct TestEnv {
    pub data: web::Data<AppState>,
    pub store: Arc<MemoryUsers>,
    pub security: SecurityConfig,
}

pub fn test_env() -> TestEnv {
    let store = Arc::new(MemoryUsers::new());
    let security = SecurityConfig::new(KeyMaterial::generate().expect("keypair generation"));
    let state = AppState::new(store.clone(), security.clone());
    TestEnv {
        data: web::Data::new(state),
        store,
        security,
    }
}

/// Insert a user directly into the store, hashing the password the same way
/// the registration handler does.
pub fn seed_user(store: &MemoryUsers, email: &str, password: &str) -> UserRecord {
    store
        .create(NewUser {
            email: email.to_string(),
            first_name: None,
            last_name: None,
            password_hash: hash_password(password).expect("hashing"),
        })
        .expect("seeding user")
}

/// A fresh bearer header value for the given identity.
pub fn bearer_for(env: &TestEnv, identity: &str) -> String {
    let token =
        mint_access_token(identity, SystemTime::now(), &env.security).expect("token minting");
    format!("Bearer {token}")
}

/// A basic-auth header value for the given credentials.
pub fn basic_for(username: &str, password: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
