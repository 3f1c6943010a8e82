//! Credential Verification
//!
//! Exactly one identity/secret pair exists in the system, but the check
//! itself sits behind a one-method trait so a deployment can swap in a real
//! multi-user store without touching the session gate's state machine.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::utils::AppError;

/// One-method verification seam
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &str, secret: &str) -> bool;
}

/// Direct plaintext comparison, as most source iterations did
pub struct PlainVerifier {
    email: String,
    password: String,
}

impl PlainVerifier {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for PlainVerifier {
    fn verify(&self, identity: &str, secret: &str) -> bool {
        identity == self.email && secret == self.password
    }
}

/// Salted-hash comparison using argon2
pub struct HashedVerifier {
    email: String,
    password_hash: String,
}

impl HashedVerifier {
    /// Wrap an existing argon2 hash string
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Hash a plaintext secret once at startup, mirroring the source's
    /// pre-save hash hook
    pub fn from_plain(
        email: impl Into<String>,
        password: &str,
    ) -> Result<Self, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        Ok(Self {
            email: email.into(),
            password_hash: hash.to_string(),
        })
    }
}

impl CredentialVerifier for HashedVerifier {
    fn verify(&self, identity: &str, secret: &str) -> bool {
        if identity != self.email {
            return false;
        }
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            tracing::error!("Stored admin password hash is not a valid argon2 hash");
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_verifier_exact_pair_only() {
        let v = PlainVerifier::new("admin@example.com", "hunter2");
        assert!(v.verify("admin@example.com", "hunter2"));
        assert!(!v.verify("admin@example.com", "wrong"));
        assert!(!v.verify("other@example.com", "hunter2"));
    }

    #[test]
    fn test_hashed_verifier_round_trip() {
        let v = HashedVerifier::from_plain("admin@example.com", "hunter2").unwrap();
        assert!(v.verify("admin@example.com", "hunter2"));
        assert!(!v.verify("admin@example.com", "hunter3"));
        assert!(!v.verify("nobody@example.com", "hunter2"));
    }

    #[test]
    fn test_hashed_verifier_rejects_garbage_hash() {
        let v = HashedVerifier::new("admin@example.com", "not-a-hash");
        assert!(!v.verify("admin@example.com", "anything"));
    }
}
