//! Discord OAuth2 provider.
//!
//! Authorization code flow against the Discord v10 API: the code is
//! exchanged with a form POST to `/oauth2/token`, and the profile is
//! read from `/users/@me` with a bearer token. Avatar hashes are turned
//! into CDN URLs here so downstream code only ever sees a full URL.

use crate::error::SocialError;
use crate::providers::{ProviderClient, ProviderProfile, ProviderTokens};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tinta_core::Provider;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DISCORD_CDN_AVATARS: &str = "https://cdn.discordapp.com/avatars";
const SCOPES: &str = "identify email";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth2 client for Discord.
#[derive(Clone)]
pub struct DiscordProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    api_base: String,
    http: Client,
}

impl DiscordProvider {
    /// Build a client for the given OAuth2 application.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, SocialError> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            api_base: DISCORD_API_BASE.to_string(),
            http,
        })
    }

    /// Point all API calls at a different base URL. Tests use this to
    /// target a local mock server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct DiscordTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    /// Display name; absent for accounts that never set one.
    global_name: Option<String>,
    /// Requires the `email` scope.
    email: Option<String>,
    verified: Option<bool>,
    /// Avatar hash, not a URL.
    avatar: Option<String>,
}

#[async_trait]
impl ProviderClient for DiscordProvider {
    fn provider(&self) -> Provider {
        Provider::Discord
    }

    fn authorization_url(&self) -> String {
        format!(
            "{}/oauth2/authorize?client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.api_base,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPES),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderTokens, SocialError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}/oauth2/token", self.api_base))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider = %Provider::Discord, %status, "Token exchange rejected");
            return Err(SocialError::ExchangeFailed {
                provider: Provider::Discord,
                status: status.as_u16(),
            });
        }

        let tokens: DiscordTokenResponse = response.json().await?;
        Ok(ProviderTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile, SocialError> {
        let response = self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider = %Provider::Discord, %status, "Profile fetch rejected");
            return Err(SocialError::ProfileFailed {
                provider: Provider::Discord,
                status: status.as_u16(),
            });
        }

        let user: DiscordUser = response.json().await?;
        let avatar_url = user
            .avatar
            .as_ref()
            .map(|hash| format!("{DISCORD_CDN_AVATARS}/{}/{hash}.png", user.id));

        Ok(ProviderProfile {
            subject_id: user.id,
            username: user.global_name.unwrap_or(user.username),
            email: user.email,
            email_verified: user.verified.unwrap_or(false),
            avatar_url,
        })
    }
}
