use std::sync::Arc;

use crate::auth::keys::KeyMaterial;

/// Security configuration shared by token issuance and verification.
///
/// Wraps the process keypair in an `Arc`: every clone references the same
/// immutable key material, so concurrent requests share it without locking.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    keys: Arc<KeyMaterial>,
}

impl SecurityConfig {
    pub fn new(keys: KeyMaterial) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }
}
