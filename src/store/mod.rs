//! User storage collaborators.
//!
//! The auth core consumes exactly two capabilities from storage: a
//! credential lookup (identity → password hash) and an ownership lookup
//! (resource id → owning identity). `UserStore` widens those with the CRUD
//! surface the HTTP handlers need. Lookups are opaque synchronous calls;
//! any timeout/retry behavior belongs to the implementation, and callers
//! treat a lookup failure the same as a miss: deny.

pub mod memory;

use time::OffsetDateTime;

use crate::error::AppError;

/// Read-only credential view, enough to verify a login.
#[derive(Debug, Clone)]
pub struct Credential {
    pub identity: String,
    pub password_hash: String,
}

/// A stored user row.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Fields for creating a user. The password arrives pre-hashed; plaintext
/// never reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
}

/// Credential lookup consumed by the authentication gate and by basic-auth
/// checking.
pub trait CredentialLookup: Send + Sync {
    fn find_credential(&self, identity: &str) -> Result<Option<Credential>, AppError>;
}

/// Ownership lookup consumed by the authorization policy. For the users
/// resource the owning identity of user id N is user N's own email.
pub trait OwnershipLookup: Send + Sync {
    fn owner_identity(&self, resource_id: i64) -> Result<Option<String>, AppError>;
}

/// Full store surface used by the CRUD handlers.
pub trait UserStore: CredentialLookup + OwnershipLookup {
    fn list(&self) -> Result<Vec<UserRecord>, AppError>;
    fn get(&self, id: i64) -> Result<Option<UserRecord>, AppError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
    /// Fails with a conflict if the email is already taken.
    fn create(&self, new_user: NewUser) -> Result<UserRecord, AppError>;
    /// Returns `None` if no such user exists; fails with a conflict if the
    /// patch renames to an email owned by someone else.
    fn update(&self, id: i64, patch: UserPatch) -> Result<Option<UserRecord>, AppError>;
    /// Returns whether a row was actually removed.
    fn delete(&self, id: i64) -> Result<bool, AppError>;
}
