pub mod jwt;
pub mod keys;
pub mod password;
pub mod policy;

/// The authenticated identity resolved for one request.
///
/// Derived transiently from a verified bearer token or from basic
/// credentials; lives in the request extensions for the duration of that
/// request and is never persisted or shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Credential identity (the user's email)
    pub identity: String,
}
