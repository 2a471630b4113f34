//! Authentication gate: credential checking and token issuance.

use std::time::SystemTime;

use tracing::debug;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::verify_password;
use crate::auth::Principal;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;
use crate::store::CredentialLookup;

/// Check a username/password pair against the credential lookup.
///
/// Unknown identity and wrong password both come back as the single
/// `InvalidCredentials` outcome; only the debug log distinguishes them, so
/// the response cannot be used to enumerate usernames.
pub fn check_password<S>(store: &S, username: &str, password: &str) -> Result<Principal, AppError>
where
    S: CredentialLookup + ?Sized,
{
    let Some(credential) = store.find_credential(username)? else {
        debug!("login rejected: unknown identity");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password, &credential.password_hash)? {
        debug!("login rejected: password mismatch");
        return Err(AppError::invalid_credentials());
    }

    Ok(Principal {
        identity: credential.identity,
    })
}

/// Validate credentials and, on success, issue a signed access token.
pub fn login<S>(
    store: &S,
    security: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<String, AppError>
where
    S: CredentialLookup + ?Sized,
{
    let principal = check_password(store, username, password)?;
    mint_access_token(&principal.identity, SystemTime::now(), security)
}
