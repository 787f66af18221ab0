//! Password hashing with Argon2id.
//!
//! Provides secure password hashing and verification using Argon2id
//! with OWASP-recommended parameters.

use crate::error::AuthError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher configuration.
///
/// Uses OWASP 2024 recommended parameters for Argon2id:
/// - Memory: 19456 KiB (19 MiB)
/// - Iterations: 2
/// - Parallelism: 1
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Create a new password hasher with OWASP-recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        // OWASP 2024 recommended parameters
        // m=19456 (19 MiB), t=2, p=1
        // These are hardcoded constants that are always valid - the expect() is acceptable
        // since failure indicates a bug in the Argon2 library, not a runtime condition.
        let params = Params::new(
            19456, // m_cost: memory in KiB
            2,     // t_cost: iterations
            1,     // p_cost: parallelism
            None,  // output_len: default (32 bytes)
        )
        .expect("OWASP 2024 Argon2 parameters are valid constants");

        Self { params }
    }

    /// Create a password hasher with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of iterations
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    ///
    /// Returns error if parameters are invalid.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::HashingFailed(format!("Invalid parameters: {e}")))?;

        Ok(Self { params })
    }

    /// Hash a password using Argon2id.
    ///
    /// Each call generates a fresh random salt, so hashing the same
    /// password twice never produces the same output.
    ///
    /// # Returns
    ///
    /// A PHC-formatted hash string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailed(format!("Hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `true` only if the password matches. Any defect in the
    /// stored hash (wrong format, truncated, not a PHC string) counts as
    /// a non-match rather than an error, so callers get a uniform `bool`
    /// regardless of what is in the store.
    #[must_use]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password using Argon2id with OWASP-recommended parameters.
///
/// Convenience function using the default `PasswordHasher`.
///
/// # Example
///
/// ```rust
/// use tinta_auth::hash_password;
///
/// let hash = hash_password("my-secure-password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    PasswordHasher::new().hash(password)
}

/// Verify a password against an Argon2id hash.
///
/// Convenience function using the default `PasswordHasher`.
///
/// # Example
///
/// ```rust
/// use tinta_auth::{hash_password, verify_password};
///
/// let hash = hash_password("my-password").unwrap();
/// assert!(verify_password("my-password", &hash));
/// assert!(!verify_password("wrong-password", &hash));
/// ```
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHasher::new().verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reduced parameters keep the test suite fast; the hashing path is
    // identical to the default configuration.
    fn test_hasher() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_password_returns_argon2id() {
        let hash = test_hasher().hash("test-password").unwrap();

        // Hash should be in PHC format starting with $argon2id$
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_password_correct() {
        let hasher = test_hasher();
        let password = "correct-password";
        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hasher = test_hasher();
        let hash = hasher.hash("correct-password").unwrap();

        assert!(!hasher.verify("wrong-password", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_non_match() {
        let hasher = test_hasher();

        assert!(!hasher.verify("password", "not-a-valid-hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$truncated"));
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = test_hasher();
        let password = "same-password";
        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Same password should produce different hashes (different salts)
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(hasher.verify(password, &hash1));
        assert!(hasher.verify(password, &hash2));
    }

    #[test]
    fn test_with_params_rejects_invalid() {
        // Below Argon2's minimum memory cost
        assert!(PasswordHasher::with_params(1, 1, 1).is_err());
    }

    #[test]
    fn test_empty_password() {
        let hasher = test_hasher();
        let hash = hasher.hash("").unwrap();
        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify("non-empty", &hash));
    }

    #[test]
    fn test_unicode_password() {
        let hasher = test_hasher();
        let password = "пароль日本語🔐";
        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_long_password() {
        let hasher = test_hasher();
        let password = "a".repeat(1000);
        let hash = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, &hash));
    }

    #[test]
    fn test_default_hash_format_contains_params() {
        let hash = hash_password("test").unwrap();

        // PHC format includes algorithm and parameters
        // Example: $argon2id$v=19$m=19456,t=2,p=1$...
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=1"));

        assert!(verify_password("test", &hash));
    }
}
