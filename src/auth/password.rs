//! Password hashing
//!
//! Argon2id with per-call random salts. Both functions are pure with respect
//! to process state, so concurrent use needs no synchronization. Plaintext
//! passwords are never logged or returned.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AppError;

/// Hash a plaintext password into a PHC-formatted digest.
///
/// The salt is randomized, so hashing the same plaintext twice yields
/// different digests; each verifies independently.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Check a plaintext password against a stored PHC digest.
///
/// A digest that cannot be parsed is a server-side data problem and is
/// reported as an error rather than a plain mismatch.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn verify_accepts_matching_password() {
        let digest = hash_password("s3cret").unwrap();
        assert!(digest.starts_with("$argon2"));
        assert!(verify_password("s3cret", &digest).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let digest = hash_password("s3cret").unwrap();
        assert!(!verify_password("S3cret", &digest).unwrap());
        assert!(!verify_password("", &digest).unwrap());
    }

    #[test]
    fn salts_are_randomized_per_call() {
        let first = hash_password("qwerty").unwrap();
        let second = hash_password("qwerty").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("qwerty", &first).unwrap());
        assert!(verify_password("qwerty", &second).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error_not_a_mismatch() {
        assert!(verify_password("qwerty", "plainly-not-a-phc-string").is_err());
    }
}
