//! External authentication providers.
//!
//! The provider set is closed: each member is an OAuth2 provider this
//! system knows how to talk to. Discord is currently the only one.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Provider discriminator for linked identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Discord,
}

impl Provider {
    /// The canonical string form, as stored and as carried in token claims.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Discord => "discord",
        }
    }

    /// Deterministic placeholder email for profiles that carry none.
    ///
    /// The `.local` TLD is not publicly registrable, so the synthesized
    /// address can never collide with one a user could choose themselves.
    /// Accounts created with a placeholder are marked email-unverified.
    #[must_use]
    pub fn placeholder_email(&self, subject_id: &str) -> String {
        format!("{0}_{1}@{0}.local", self.as_str(), subject_id)
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    /// The rejected input.
    pub value: String,
}

impl Display for ParseProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown provider: {}", self.value)
    }
}

impl std::error::Error for ParseProviderError {}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discord" => Ok(Provider::Discord),
            other => Err(ParseProviderError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_stored_form() {
        assert_eq!(Provider::Discord.to_string(), "discord");
    }

    #[test]
    fn test_from_str_roundtrip() {
        assert_eq!("discord".parse::<Provider>().unwrap(), Provider::Discord);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "github".parse::<Provider>().unwrap_err();
        assert_eq!(err.value, "github");
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Provider::Discord).unwrap();
        assert_eq!(json, "\"discord\"");
    }

    #[test]
    fn test_placeholder_email_is_deterministic() {
        let a = Provider::Discord.placeholder_email("999");
        let b = Provider::Discord.placeholder_email("999");
        assert_eq!(a, b);
        assert_eq!(a, "discord_999@discord.local");
    }

    #[test]
    fn test_placeholder_email_varies_by_subject() {
        assert_ne!(
            Provider::Discord.placeholder_email("1"),
            Provider::Discord.placeholder_email("2")
        );
    }
}
