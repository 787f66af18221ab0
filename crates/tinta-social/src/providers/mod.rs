//! OAuth2 provider clients.
//!
//! Each provider implements [`ProviderClient`], normalizing its wire
//! formats into [`ProviderTokens`] and [`ProviderProfile`] so the
//! resolver never sees provider-specific shapes.

pub mod discord;

use crate::error::SocialError;
use async_trait::async_trait;
use tinta_core::Provider;

pub use discord::DiscordProvider;

/// Tokens returned by a provider's code exchange.
#[derive(Debug, Clone)]
pub struct ProviderTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds, when the provider reports one.
    pub expires_in: Option<i64>,
}

/// Normalized profile fetched from a provider.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Provider-assigned stable subject id.
    pub subject_id: String,
    /// Display name, preferred over the login handle when available.
    pub username: String,
    pub email: Option<String>,
    /// Whether the provider vouches for the email. Meaningless when
    /// `email` is `None`.
    pub email_verified: bool,
    pub avatar_url: Option<String>,
}

impl ProviderProfile {
    /// Split the display name into given and family parts at the first
    /// space. A name without a space becomes the given name alone.
    #[must_use]
    pub fn split_name(&self) -> (String, String) {
        match self.username.split_once(' ') {
            Some((given, family)) => (given.to_string(), family.to_string()),
            None => (self.username.clone(), String::new()),
        }
    }
}

/// A client for one OAuth2 provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> Provider;

    /// The URL to send the user to for consent.
    fn authorization_url(&self) -> String;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<ProviderTokens, SocialError>;

    /// Fetch the user's profile with an access token.
    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile, SocialError>;
}
