//! The credential store abstraction.
//!
//! Multi-row write operations (`create_social_account`, `link_identity`)
//! are single trait methods so each backend can guarantee atomicity its
//! own way: Postgres wraps them in one transaction, the in-memory store
//! performs them under one lock. No partial state is ever observable.

use crate::error::StoreError;
use crate::models::{Account, LinkedIdentity, NewAccount, NewLinkedIdentity};
use async_trait::async_trait;
use tinta_core::{AccountId, IdentityId, Provider};

/// Persistence interface for accounts and linked identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by id.
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Look up an account by exact (case-sensitive) email.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// `StoreError::EmailExists` if the email is already taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Look up a linked identity by its provider-assigned subject.
    async fn find_identity_by_subject(
        &self,
        provider: Provider,
        subject_id: &str,
    ) -> Result<Option<LinkedIdentity>, StoreError>;

    /// Look up the linked identity owned by an account, if any.
    async fn find_identity_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<LinkedIdentity>, StoreError>;

    /// Overwrite an identity's provider tokens in place.
    async fn update_identity_tokens(
        &self,
        id: IdentityId,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<LinkedIdentity, StoreError>;

    /// Atomically create a new account together with its linked identity.
    ///
    /// # Errors
    ///
    /// `StoreError::EmailExists` or `StoreError::IdentityExists` if either
    /// insert would violate a uniqueness invariant; nothing is created in
    /// that case.
    async fn create_social_account(
        &self,
        account: NewAccount,
        identity: NewLinkedIdentity,
    ) -> Result<(Account, LinkedIdentity), StoreError>;

    /// Attach a linked identity to an existing account.
    ///
    /// # Errors
    ///
    /// `StoreError::IdentityExists` if the subject is already claimed or
    /// the account already holds an identity.
    async fn link_identity(
        &self,
        account_id: AccountId,
        identity: NewLinkedIdentity,
    ) -> Result<LinkedIdentity, StoreError>;
}
