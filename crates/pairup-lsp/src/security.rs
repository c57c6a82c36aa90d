//! Password-hash verification for observer authentication.
//!
//! The configured secret is stored as an Argon2 hash; an observer's `auth`
//! token is verified against it, never compared as plaintext.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// Compare `candidate` against `hash`. Returns `false` (never panics) on a
/// malformed hash or any other verification failure — both are
/// authentication failures from the caller's point of view.
pub fn verify(hash: &str, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default().verify_password(candidate.as_bytes(), &parsed).is_ok()
}
