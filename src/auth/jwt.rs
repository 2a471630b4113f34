//! Access token issuance and verification.
//!
//! Tokens are EdDSA-signed JWTs carrying `{iss, sub, iat, exp}` with a fixed
//! one-hour lifetime and issuer `"self"`. Verification is a pure function of
//! the token string, the public key and the caller-supplied clock; it touches
//! no storage, so it is safe under unsynchronized concurrent use.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Principal;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Issuer claim stamped into and required of every token.
pub const ISSUER: &str = "self";

/// Fixed token lifetime: one hour.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    /// Credential identity (the user's email)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch), always `iat + TOKEN_TTL_SECS`
    pub exp: i64,
}

/// Why a token failed verification. Internal only: every variant collapses
/// to a generic 401 on the wire.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token cannot be decoded")]
    Malformed,
    #[error("token signature does not verify")]
    SignatureInvalid,
    #[error("token issuer mismatch")]
    IssuerMismatch,
    #[error("token expired")]
    Expired,
}

fn unix_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(_) => 0,
    }
}

/// Mint a signed access token asserting `subject`, valid for one hour from
/// `now`. The only failure is signing itself, which means broken key
/// material and is reported as an internal error.
pub fn mint_access_token(
    subject: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = unix_seconds(now);

    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: subject.to_string(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::EdDSA),
        &claims,
        security.keys().encoding_key(),
    )
    .map_err(|e| AppError::internal(format!("Failed to sign access token: {e}")))
}

/// Verify a token against the process public key and the supplied clock.
///
/// Checks run in a fixed order, each with its own failure mode: decode
/// (`Malformed`), signature (`SignatureInvalid`), issuer (`IssuerMismatch`),
/// expiry (`Expired`). A token is valid strictly while `now < exp`.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Principal, TokenError> {
    let claims = decode_and_check_signature(token, security.keys().decoding_key())?;

    if claims.iss != ISSUER {
        return Err(TokenError::IssuerMismatch);
    }

    if unix_seconds(now) >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(Principal {
        identity: claims.sub,
    })
}

fn decode_and_check_signature(token: &str, key: &DecodingKey) -> Result<Claims, TokenError> {
    // Expiry and issuer are checked by hand afterwards against the injected
    // clock, so only structure and signature are validated here.
    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            _ => TokenError::Malformed,
        })
}
