//! Error types for social authentication.

use thiserror::Error;
use tinta_core::{AccountId, Provider};
use tinta_db::StoreError;

/// Errors raised while talking to a provider or resolving an identity.
#[derive(Debug, Error)]
pub enum SocialError {
    /// The provider rejected the authorization code exchange.
    #[error("Token exchange with {provider} failed: HTTP {status}")]
    ExchangeFailed { provider: Provider, status: u16 },

    /// The provider rejected or failed the profile fetch.
    #[error("Profile fetch from {provider} failed: HTTP {status}")]
    ProfileFailed { provider: Provider, status: u16 },

    /// The profile's email belongs to an existing account and automatic
    /// linking is disabled.
    #[error("Profile email already belongs to an existing account")]
    AccountCollision { account_id: AccountId },

    /// A uniqueness race persisted across the retry.
    #[error("Conflicting concurrent login for the same identity")]
    Conflict,

    /// Transport-level failure reaching the provider.
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SocialError {
    /// Whether this error originated in a call to the provider.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            SocialError::ExchangeFailed { .. }
                | SocialError::ProfileFailed { .. }
                | SocialError::Http(_)
        )
    }
}
