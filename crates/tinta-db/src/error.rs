//! Storage error types.

use thiserror::Error;

/// Errors surfaced by credential store implementations.
///
/// `EmailExists` and `IdentityExists` are the typed forms of the two
/// uniqueness invariants; backends translate their native constraint
/// violations into them so callers never match on driver errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An account with this email already exists.
    #[error("Email is already registered")]
    EmailExists,

    /// The (provider, subject) pair is already linked, or the account
    /// already holds a linked identity.
    #[error("External identity is already linked")]
    IdentityExists,

    /// A stored record could not be mapped back into a domain type.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Check whether this error is one of the uniqueness conflicts.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::EmailExists | StoreError::IdentityExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StoreError::EmailExists.to_string(),
            "Email is already registered"
        );
        assert_eq!(
            StoreError::IdentityExists.to_string(),
            "External identity is already linked"
        );
    }

    #[test]
    fn test_is_conflict() {
        assert!(StoreError::EmailExists.is_conflict());
        assert!(StoreError::IdentityExists.is_conflict());
        assert!(!StoreError::Corrupt("bad role".to_string()).is_conflict());
    }
}
