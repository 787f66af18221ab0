//! Linked provider identity model.
//!
//! A provider credential bound to exactly one account. The store enforces
//! both uniqueness invariants: one linked identity per account, and one
//! account per (provider, subject) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tinta_core::{AccountId, IdentityId, Provider};

/// Binding between an account and one external provider subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedIdentity {
    pub id: IdentityId,
    /// Owning account; unique, so an account holds at most one identity.
    pub account_id: AccountId,
    pub provider: Provider,
    /// Provider-assigned stable subject id.
    pub subject_id: String,
    /// Most recent provider access token; overwritten on every login.
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a linked identity.
#[derive(Debug, Clone)]
pub struct NewLinkedIdentity {
    pub provider: Provider,
    pub subject_id: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl NewLinkedIdentity {
    #[must_use]
    pub fn new(
        provider: Provider,
        subject_id: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            provider,
            subject_id: subject_id.into(),
            access_token: access_token.into(),
            refresh_token,
        }
    }
}
