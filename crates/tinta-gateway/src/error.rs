//! The gateway's error taxonomy.
//!
//! Everything a caller can observe from an authentication operation is
//! one of these variants. Credential failures are deliberately uniform:
//! wrong password, unknown email, and password-less account all surface
//! as `InvalidCredentials` so the response never reveals which it was.

use thiserror::Error;
use tinta_auth::AuthError;
use tinta_core::{AccountId, Role};
use tinta_db::StoreError;
use tinta_social::SocialError;

/// Errors surfaced by [`AuthGateway`](crate::AuthGateway) operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The email/password pair did not authenticate.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration rejected: the email already belongs to an account.
    #[error("Email is already registered")]
    EmailTaken,

    /// Bad signature, malformed structure, or expired token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// A token's account no longer exists, or a lookup targeted a
    /// missing account.
    #[error("Account {id} not found")]
    AccountNotFound { id: AccountId },

    /// The account holds a different role than the operation requires.
    #[error("Operation requires the {required} role")]
    Forbidden { required: Role },

    /// A social profile's email belongs to an existing account and
    /// automatic linking is disabled.
    #[error("Email already belongs to an existing account")]
    AccountCollision,

    /// The provider rejected or failed the authorization code exchange.
    #[error("Provider code exchange failed")]
    ProviderExchangeFailed {
        #[source]
        source: SocialError,
    },

    /// The provider rejected or failed the profile fetch.
    #[error("Provider profile fetch failed")]
    ProviderProfileFailed {
        #[source]
        source: SocialError,
    },

    /// A uniqueness race persisted across the resolver's retry.
    #[error("Conflicting concurrent request")]
    StoreConflict,

    #[error(transparent)]
    Store(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailExists => GatewayError::EmailTaken,
            StoreError::IdentityExists => GatewayError::StoreConflict,
            other => GatewayError::Store(other),
        }
    }
}

impl From<AuthError> for GatewayError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => GatewayError::InvalidToken,
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

impl GatewayError {
    /// Whether this error should map to an HTTP 401 at a transport layer.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidCredentials | GatewayError::InvalidToken
        )
    }
}
