//! Identity resolution for social logins.
//!
//! Maps a fetched provider profile onto exactly one account:
//!
//! 1. A known (provider, subject) pair wins outright; its stored tokens
//!    are refreshed and the owning account is returned.
//! 2. Otherwise the profile's email (or a deterministic placeholder when
//!    the provider reports none) is matched against existing accounts.
//!    A match links the identity to that account when automatic linking
//!    is enabled, and is a collision error when it is not.
//! 3. Otherwise a fresh password-less account is created together with
//!    its identity, atomically.
//!
//! A uniqueness conflict from the store means another request won a
//! race; the whole resolution is retried once before giving up.

use crate::error::SocialError;
use crate::providers::{ProviderProfile, ProviderTokens};
use std::sync::Arc;
use tinta_core::Provider;
use tinta_db::{Account, CredentialStore, LinkedIdentity, NewAccount, NewLinkedIdentity, StoreError};

/// Resolves provider profiles to accounts.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn CredentialStore>,
    link_by_email: bool,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, link_by_email: bool) -> Self {
        Self {
            store,
            link_by_email,
        }
    }

    /// Resolve a profile to its account, creating or linking as needed.
    pub async fn resolve(
        &self,
        provider: Provider,
        profile: &ProviderProfile,
        tokens: &ProviderTokens,
    ) -> Result<(Account, LinkedIdentity), SocialError> {
        match self.try_resolve(provider, profile, tokens).await {
            Err(SocialError::Store(err)) if err.is_conflict() => {
                // A concurrent login inserted the row we were about to.
                // The second pass will find it through the lookups.
                tracing::warn!(
                    %provider,
                    subject_id = %profile.subject_id,
                    "Uniqueness race during social login, retrying"
                );
                match self.try_resolve(provider, profile, tokens).await {
                    Err(SocialError::Store(err)) if err.is_conflict() => {
                        Err(SocialError::Conflict)
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    async fn try_resolve(
        &self,
        provider: Provider,
        profile: &ProviderProfile,
        tokens: &ProviderTokens,
    ) -> Result<(Account, LinkedIdentity), SocialError> {
        if let Some(identity) = self
            .store
            .find_identity_by_subject(provider, &profile.subject_id)
            .await?
        {
            let identity = self
                .store
                .update_identity_tokens(
                    identity.id,
                    &tokens.access_token,
                    tokens.refresh_token.as_deref(),
                )
                .await?;
            let account = self
                .store
                .find_account_by_id(identity.account_id)
                .await?
                .ok_or_else(|| {
                    StoreError::Corrupt(format!(
                        "identity {} references missing account {}",
                        identity.id, identity.account_id
                    ))
                })?;
            tracing::info!(%provider, account_id = %account.id, "Returning social login");
            return Ok((account, identity));
        }

        let (email, email_verified) = match &profile.email {
            Some(email) => (email.clone(), profile.email_verified),
            None => (provider.placeholder_email(&profile.subject_id), false),
        };

        match self.store.find_account_by_email(&email).await? {
            Some(account) => {
                if !self.link_by_email {
                    tracing::warn!(
                        %provider,
                        account_id = %account.id,
                        "Refusing to auto-link social identity to existing account"
                    );
                    return Err(SocialError::AccountCollision {
                        account_id: account.id,
                    });
                }
                let identity = self
                    .store
                    .link_identity(account.id, new_identity(provider, profile, tokens))
                    .await?;
                tracing::info!(%provider, account_id = %account.id, "Linked identity to existing account");
                Ok((account, identity))
            }
            None => {
                let (name, lastname) = profile.split_name();
                let account = NewAccount::social(
                    name,
                    lastname,
                    email,
                    profile.avatar_url.clone(),
                    email_verified,
                );
                let (account, identity) = self
                    .store
                    .create_social_account(account, new_identity(provider, profile, tokens))
                    .await?;
                tracing::info!(%provider, account_id = %account.id, "Created account from social login");
                Ok((account, identity))
            }
        }
    }
}

fn new_identity(
    provider: Provider,
    profile: &ProviderProfile,
    tokens: &ProviderTokens,
) -> NewLinkedIdentity {
    NewLinkedIdentity::new(
        provider,
        &profile.subject_id,
        &tokens.access_token,
        tokens.refresh_token.clone(),
    )
}
