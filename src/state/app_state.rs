use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::store::UserStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// User store; also serves the credential and ownership lookups
    pub users: Arc<dyn UserStore>,
    /// Security configuration holding the signing key material
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, security: SecurityConfig) -> Self {
        Self { users, security }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
