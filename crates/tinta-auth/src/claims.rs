//! Session token claims.
//!
//! A fixed, typed claims shape. Every field is named and validated at
//! deserialization time, so the payload a token was issued with is the
//! payload validation hands back.

use serde::{Deserialize, Serialize};
use tinta_core::{AccountId, ParseIdError, Provider, Role};

/// Decoded contents of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id, as a string per JWT convention.
    pub sub: String,
    /// Account email at issuance time.
    pub email: String,
    /// Account role at issuance time.
    pub role: Role,
    /// Provider that minted this session; absent for local logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<Provider>,
    /// Expiration as a Unix timestamp, set by the token service on issue.
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a local session. The expiration is filled in by
    /// [`TokenService::issue`](crate::TokenService::issue).
    #[must_use]
    pub fn new(account_id: AccountId, email: impl Into<String>, role: Role) -> Self {
        Self {
            sub: account_id.to_string(),
            email: email.into(),
            role,
            auth_provider: None,
            exp: 0,
        }
    }

    /// Mark these claims as belonging to a social session.
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Parse the subject back into a typed account id.
    pub fn account_id(&self) -> Result<AccountId, ParseIdError> {
        self.sub.parse()
    }

    /// Whether this session was minted by a social login.
    #[must_use]
    pub fn is_social(&self) -> bool {
        self.auth_provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_subject_from_account_id() {
        let claims = SessionClaims::new(AccountId::new(7), "ana@x.com", Role::User);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.account_id().unwrap(), AccountId::new(7));
        assert!(!claims.is_social());
    }

    #[test]
    fn test_with_provider_marks_social() {
        let claims =
            SessionClaims::new(AccountId::new(1), "a@b.c", Role::User).with_provider(Provider::Discord);
        assert!(claims.is_social());
        assert_eq!(claims.auth_provider, Some(Provider::Discord));
    }

    #[test]
    fn test_local_session_omits_provider_from_payload() {
        let claims = SessionClaims::new(AccountId::new(1), "a@b.c", Role::Admin);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("auth_provider"));
        assert!(json.contains("\"role\":\"admin\""));
    }

    #[test]
    fn test_social_session_includes_provider_in_payload() {
        let claims =
            SessionClaims::new(AccountId::new(1), "a@b.c", Role::User).with_provider(Provider::Discord);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"auth_provider\":\"discord\""));
    }

    #[test]
    fn test_deserialize_without_provider_field() {
        let json = r#"{"sub":"3","email":"a@b.c","role":"user","exp":123}"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.auth_provider, None);
        assert_eq!(claims.exp, 123);
    }

    #[test]
    fn test_account_id_rejects_non_numeric_subject() {
        let mut claims = SessionClaims::new(AccountId::new(1), "a@b.c", Role::User);
        claims.sub = "not-a-number".to_string();
        assert!(claims.account_id().is_err());
    }
}
