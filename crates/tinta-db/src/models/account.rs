//! Account model.
//!
//! The canonical identity record. An account carries a password hash iff
//! it was created through local registration; social-created accounts
//! have none until (and unless) a password is ever set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tinta_core::{AccountId, Role};

/// The canonical user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Given name.
    pub name: String,
    /// Family name; empty when the source display name had no space.
    pub lastname: String,
    /// Globally unique among accounts, compared case-sensitively.
    pub email: String,
    /// PHC-formatted Argon2id hash; `None` for social-only accounts.
    pub password_hash: Option<String>,
    pub role: Role,
    pub avatar_url: Option<String>,
    /// False for placeholder emails and anything else no provider vouched for.
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether this account can authenticate with a password.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.lastname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.lastname)
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub email_verified: bool,
}

impl NewAccount {
    /// A locally registered account with a password.
    #[must_use]
    pub fn local(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
            password_hash: Some(password_hash.into()),
            role: Role::default(),
            avatar_url: None,
            email_verified: false,
        }
    }

    /// A password-less account created by a social login.
    #[must_use]
    pub fn social(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        avatar_url: Option<String>,
        email_verified: bool,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
            password_hash: None,
            role: Role::default(),
            avatar_url,
            email_verified,
        }
    }
}
