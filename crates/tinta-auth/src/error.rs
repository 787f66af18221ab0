//! Error types for authentication operations.

use thiserror::Error;

/// Authentication error types.
///
/// Token validation failures are deliberately collapsed into a single
/// `InvalidToken` variant: distinguishing expired from forged from
/// malformed tokens would hand an oracle to callers outside this process.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Password hashing operation failed.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Token could not be signed.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    /// Token is malformed, carries a bad signature, or has expired.
    #[error("Invalid token")]
    InvalidToken,
}

impl AuthError {
    /// Check if this error indicates a rejected bearer token.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::InvalidToken;
        assert_eq!(err.to_string(), "Invalid token");

        let err = AuthError::HashingFailed("out of memory".to_string());
        assert_eq!(err.to_string(), "Password hashing failed: out of memory");
    }

    #[test]
    fn test_invalid_token_carries_no_detail() {
        // The display string must not leak why validation failed.
        let err = AuthError::InvalidToken;
        assert!(!err.to_string().to_lowercase().contains("expired"));
        assert!(!err.to_string().to_lowercase().contains("signature"));
    }

    #[test]
    fn test_is_invalid_token() {
        assert!(AuthError::InvalidToken.is_invalid_token());
        assert!(!AuthError::HashingFailed("x".to_string()).is_invalid_token());
    }
}
