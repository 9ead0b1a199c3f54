//! Password hashing utilities

use bcrypt::{hash, verify};
use tracing::warn;

use crate::domain::PasswordEncoder;
use crate::shared::{DomainError, DomainResult};

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// bcrypt-backed [`PasswordEncoder`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &str) -> DomainResult<String> {
        hash_password(raw, self.cost)
            .map_err(|e| DomainError::Crypto(format!("Failed to hash password: {}", e)))
    }

    fn matches(&self, raw: &str, hash: &str) -> bool {
        verify_password(raw, hash).unwrap_or_else(|e| {
            warn!("Password verification failed: {}", e);
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_match() {
        let encoder = BcryptPasswordEncoder::new(4);
        let hash = encoder.encode("proba").unwrap();

        assert_ne!(hash, "proba");
        assert!(encoder.matches("proba", &hash));
        assert!(!encoder.matches("wrong", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let encoder = BcryptPasswordEncoder::new(4);
        let a = encoder.encode("proba").unwrap();
        let b = encoder.encode("proba").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_matches() {
        let encoder = BcryptPasswordEncoder::new(4);
        assert!(!encoder.matches("proba", "not-a-bcrypt-hash"));
    }

    #[test]
    fn invalid_cost_is_a_crypto_error() {
        let encoder = BcryptPasswordEncoder::new(99);
        assert!(matches!(encoder.encode("proba"), Err(DomainError::Crypto(_))));
    }
}
