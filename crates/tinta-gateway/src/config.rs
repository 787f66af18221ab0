//! Gateway configuration, loaded from the environment.

use chrono::Duration;
use std::env;
use std::fmt;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime configuration for the authentication gateway.
///
/// The `Debug` impl redacts secrets, so the struct can be logged at
/// startup without leaking credentials.
#[derive(Clone)]
pub struct GatewayConfig {
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Session token lifetime.
    pub token_ttl: Duration,
    /// Whether a social profile whose email matches an existing account
    /// is linked to it automatically.
    pub link_social_by_email: bool,
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_uri: String,
}

impl GatewayConfig {
    /// Load configuration from the environment, reading a `.env` file
    /// first when one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            jwt_secret: required("JWT_SECRET")?,
            token_ttl: Duration::minutes(parse_or("TOKEN_TTL_MINUTES", 30)?),
            link_social_by_email: parse_or("LINK_SOCIAL_BY_EMAIL", true)?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_uri: required("DISCORD_REDIRECT_URI")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar { name })
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("link_social_by_email", &self.link_social_by_email)
            .field("discord_client_id", &self.discord_client_id)
            .field("discord_client_secret", &"[REDACTED]")
            .field("discord_redirect_uri", &self.discord_redirect_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            jwt_secret: "super-secret".to_string(),
            token_ttl: Duration::minutes(30),
            link_social_by_email: true,
            discord_client_id: "app-id".to_string(),
            discord_client_secret: "app-secret".to_string(),
            discord_redirect_uri: "https://tinta.example/callback".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let out = format!("{:?}", config());
        assert!(!out.contains("super-secret"));
        assert!(!out.contains("app-secret"));
        assert!(out.contains("[REDACTED]"));
        assert!(out.contains("app-id"));
    }
}
