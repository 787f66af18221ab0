//! In-memory credential store.
//!
//! Backs the test suites and is suitable for embedding. Ids are assigned
//! sequentially starting at 1, matching what a fresh database would hand
//! out. All operations run under a single mutex, which makes the
//! multi-row writes trivially atomic.

use crate::error::StoreError;
use crate::models::{Account, LinkedIdentity, NewAccount, NewLinkedIdentity};
use crate::store::CredentialStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tinta_core::{AccountId, IdentityId, Provider};

#[derive(Debug)]
struct Inner {
    accounts: Vec<Account>,
    identities: Vec<LinkedIdentity>,
    next_account_id: i64,
    next_identity_id: i64,
}

/// In-memory [`CredentialStore`] implementation.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                accounts: Vec::new(),
                identities: Vec::new(),
                next_account_id: 1,
                next_identity_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test thread; the data is
        // still consistent because every write completes before unlock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn insert_account(&mut self, account: NewAccount) -> Result<Account, StoreError> {
        if self.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::EmailExists);
        }

        let now = Utc::now();
        let created = Account {
            id: AccountId::new(self.next_account_id),
            name: account.name,
            lastname: account.lastname,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            avatar_url: account.avatar_url,
            email_verified: account.email_verified,
            created_at: now,
            updated_at: now,
        };
        self.next_account_id += 1;
        self.accounts.push(created.clone());
        Ok(created)
    }

    fn insert_identity(
        &mut self,
        account_id: AccountId,
        identity: NewLinkedIdentity,
    ) -> Result<LinkedIdentity, StoreError> {
        let subject_taken = self
            .identities
            .iter()
            .any(|i| i.provider == identity.provider && i.subject_id == identity.subject_id);
        let account_taken = self.identities.iter().any(|i| i.account_id == account_id);
        if subject_taken || account_taken {
            return Err(StoreError::IdentityExists);
        }

        let now = Utc::now();
        let created = LinkedIdentity {
            id: IdentityId::new(self.next_identity_id),
            account_id,
            provider: identity.provider,
            subject_id: identity.subject_id,
            access_token: identity.access_token,
            refresh_token: identity.refresh_token,
            created_at: now,
            updated_at: now,
        };
        self.next_identity_id += 1;
        self.identities.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.lock().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        // Exact comparison: email uniqueness is case-sensitive.
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.lock().insert_account(account)
    }

    async fn find_identity_by_subject(
        &self,
        provider: Provider,
        subject_id: &str,
    ) -> Result<Option<LinkedIdentity>, StoreError> {
        Ok(self
            .lock()
            .identities
            .iter()
            .find(|i| i.provider == provider && i.subject_id == subject_id)
            .cloned())
    }

    async fn find_identity_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<LinkedIdentity>, StoreError> {
        Ok(self
            .lock()
            .identities
            .iter()
            .find(|i| i.account_id == account_id)
            .cloned())
    }

    async fn update_identity_tokens(
        &self,
        id: IdentityId,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<LinkedIdentity, StoreError> {
        let mut inner = self.lock();
        let identity = inner
            .identities
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        identity.access_token = access_token.to_string();
        identity.refresh_token = refresh_token.map(ToString::to_string);
        identity.updated_at = Utc::now();
        Ok(identity.clone())
    }

    async fn create_social_account(
        &self,
        account: NewAccount,
        identity: NewLinkedIdentity,
    ) -> Result<(Account, LinkedIdentity), StoreError> {
        let mut inner = self.lock();

        // Check the identity invariants up front so a conflict leaves no
        // half-created account behind.
        let subject_taken = inner
            .identities
            .iter()
            .any(|i| i.provider == identity.provider && i.subject_id == identity.subject_id);
        if subject_taken {
            return Err(StoreError::IdentityExists);
        }

        let created_account = inner.insert_account(account)?;
        let created_identity = inner.insert_identity(created_account.id, identity)?;
        Ok((created_account, created_identity))
    }

    async fn link_identity(
        &self,
        account_id: AccountId,
        identity: NewLinkedIdentity,
    ) -> Result<LinkedIdentity, StoreError> {
        self.lock().insert_identity(account_id, identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinta_core::Role;

    fn local(email: &str) -> NewAccount {
        NewAccount::local("Ana", "Lopez", email, "$argon2id$hash")
    }

    fn identity(subject: &str) -> NewLinkedIdentity {
        NewLinkedIdentity::new(Provider::Discord, subject, "access", Some("refresh".to_string()))
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let a = store.create_account(local("a@x.com")).await.unwrap();
        let b = store.create_account(local("b@x.com")).await.unwrap();

        assert_eq!(a.id, AccountId::new(1));
        assert_eq!(b.id, AccountId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.create_account(local("a@x.com")).await.unwrap();

        let result = store.create_account(local("a@x.com")).await;
        assert!(matches!(result.unwrap_err(), StoreError::EmailExists));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        store.create_account(local("Ana@x.com")).await.unwrap();

        assert!(store
            .find_account_by_email("Ana@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_account_by_email("ana@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_account_by_id() {
        let store = MemoryStore::new();
        let created = store.create_account(local("a@x.com")).await.unwrap();

        let found = store.find_account_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(store
            .find_account_by_id(AccountId::new(99))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_social_account_is_atomic() {
        let store = MemoryStore::new();
        let (account, linked) = store
            .create_social_account(
                NewAccount::social("Ana", "Lopez", "a@x.com", None, true),
                identity("999"),
            )
            .await
            .unwrap();

        assert_eq!(account.id, AccountId::new(1));
        assert_eq!(linked.account_id, account.id);
        assert!(account.password_hash.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_subject_rejected_without_leftover_account() {
        let store = MemoryStore::new();
        store
            .create_social_account(
                NewAccount::social("Ana", "Lopez", "a@x.com", None, true),
                identity("999"),
            )
            .await
            .unwrap();

        let result = store
            .create_social_account(
                NewAccount::social("Bob", "", "b@x.com", None, true),
                identity("999"),
            )
            .await;
        assert!(matches!(result.unwrap_err(), StoreError::IdentityExists));

        // The conflicting attempt must not have created the second account.
        assert!(store
            .find_account_by_email("b@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_one_identity_per_account() {
        let store = MemoryStore::new();
        let account = store.create_account(local("a@x.com")).await.unwrap();

        store.link_identity(account.id, identity("1")).await.unwrap();
        let result = store.link_identity(account.id, identity("2")).await;
        assert!(matches!(result.unwrap_err(), StoreError::IdentityExists));
    }

    #[tokio::test]
    async fn test_update_identity_tokens_in_place() {
        let store = MemoryStore::new();
        let account = store.create_account(local("a@x.com")).await.unwrap();
        let linked = store.link_identity(account.id, identity("999")).await.unwrap();

        let updated = store
            .update_identity_tokens(linked.id, "new-access", None)
            .await
            .unwrap();

        assert_eq!(updated.id, linked.id);
        assert_eq!(updated.access_token, "new-access");
        assert_eq!(updated.refresh_token, None);

        // Still exactly one identity row for the subject.
        let found = store
            .find_identity_by_subject(Provider::Discord, "999")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.access_token, "new-access");
    }

    #[tokio::test]
    async fn test_find_identity_by_account() {
        let store = MemoryStore::new();
        let account = store.create_account(local("a@x.com")).await.unwrap();
        assert!(store
            .find_identity_by_account(account.id)
            .await
            .unwrap()
            .is_none());

        let linked = store.link_identity(account.id, identity("999")).await.unwrap();
        let found = store.find_identity_by_account(account.id).await.unwrap();
        assert_eq!(found, Some(linked));
    }

    #[tokio::test]
    async fn test_created_account_defaults() {
        let store = MemoryStore::new();
        let account = store.create_account(local("a@x.com")).await.unwrap();

        assert_eq!(account.role, Role::User);
        assert!(account.is_local());
    }
}
