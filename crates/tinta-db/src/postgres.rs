//! Postgres credential store.
//!
//! Queries are runtime-checked `query_as` into private row structs, which
//! are then mapped into the domain models. Uniqueness violations are
//! translated from the named constraints in the schema into the typed
//! `StoreError` conflicts.

use crate::error::StoreError;
use crate::models::{Account, LinkedIdentity, NewAccount, NewLinkedIdentity};
use crate::store::CredentialStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tinta_core::{AccountId, IdentityId, Provider};

/// Postgres-backed [`CredentialStore`] implementation.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database at `url`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Run all pending migrations, embedded at compile time.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::info!("Running credential store migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Access the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Internal row type for account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    lastname: String,
    email: String,
    password_hash: Option<String>,
    role: String,
    avatar_url: Option<String>,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, StoreError> {
        let role = self
            .role
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {e}", self.id)))?;

        Ok(Account {
            id: AccountId::new(self.id),
            name: self.name,
            lastname: self.lastname,
            email: self.email,
            password_hash: self.password_hash,
            role,
            avatar_url: self.avatar_url,
            email_verified: self.email_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for linked identity queries.
#[derive(Debug, sqlx::FromRow)]
struct IdentityRow {
    id: i64,
    account_id: i64,
    provider: String,
    subject_id: String,
    access_token: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> Result<LinkedIdentity, StoreError> {
        let provider = self
            .provider
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("identity {}: {e}", self.id)))?;

        Ok(LinkedIdentity {
            id: IdentityId::new(self.id),
            account_id: AccountId::new(self.account_id),
            provider,
            subject_id: self.subject_id,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Translate unique-constraint violations into typed conflicts.
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        match db.constraint() {
            Some("uq_accounts_email") => return StoreError::EmailExists,
            Some("uq_linked_identities_subject") | Some("uq_linked_identities_account") => {
                return StoreError::IdentityExists
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

const INSERT_ACCOUNT: &str = r"
    INSERT INTO accounts (name, lastname, email, password_hash, role, avatar_url, email_verified)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING *
";

const INSERT_IDENTITY: &str = r"
    INSERT INTO linked_identities (account_id, provider, subject_id, access_token, refresh_token)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING *
";

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        // Exact comparison: email uniqueness is case-sensitive.
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let row: AccountRow = sqlx::query_as(INSERT_ACCOUNT)
            .bind(&account.name)
            .bind(&account.lastname)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(&account.avatar_url)
            .bind(account.email_verified)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.into_account()
    }

    async fn find_identity_by_subject(
        &self,
        provider: Provider,
        subject_id: &str,
    ) -> Result<Option<LinkedIdentity>, StoreError> {
        let row: Option<IdentityRow> = sqlx::query_as(
            "SELECT * FROM linked_identities WHERE provider = $1 AND subject_id = $2",
        )
        .bind(provider.as_str())
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(IdentityRow::into_identity).transpose()
    }

    async fn find_identity_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<LinkedIdentity>, StoreError> {
        let row: Option<IdentityRow> =
            sqlx::query_as("SELECT * FROM linked_identities WHERE account_id = $1")
                .bind(account_id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        row.map(IdentityRow::into_identity).transpose()
    }

    async fn update_identity_tokens(
        &self,
        id: IdentityId,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<LinkedIdentity, StoreError> {
        let row: IdentityRow = sqlx::query_as(
            r"
            UPDATE linked_identities
            SET access_token = $2, refresh_token = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i64())
        .bind(access_token)
        .bind(refresh_token)
        .fetch_one(&self.pool)
        .await?;

        row.into_identity()
    }

    async fn create_social_account(
        &self,
        account: NewAccount,
        identity: NewLinkedIdentity,
    ) -> Result<(Account, LinkedIdentity), StoreError> {
        let mut tx = self.pool.begin().await?;

        let account_row: AccountRow = sqlx::query_as(INSERT_ACCOUNT)
            .bind(&account.name)
            .bind(&account.lastname)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(&account.avatar_url)
            .bind(account.email_verified)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        let identity_row: IdentityRow = sqlx::query_as(INSERT_IDENTITY)
            .bind(account_row.id)
            .bind(identity.provider.as_str())
            .bind(&identity.subject_id)
            .bind(&identity.access_token)
            .bind(&identity.refresh_token)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        tx.commit().await?;

        Ok((account_row.into_account()?, identity_row.into_identity()?))
    }

    async fn link_identity(
        &self,
        account_id: AccountId,
        identity: NewLinkedIdentity,
    ) -> Result<LinkedIdentity, StoreError> {
        let row: IdentityRow = sqlx::query_as(INSERT_IDENTITY)
            .bind(account_id.as_i64())
            .bind(identity.provider.as_str())
            .bind(&identity.subject_id)
            .bind(&identity.access_token)
            .bind(&identity.refresh_token)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.into_identity()
    }
}

#[cfg(test)]
mod tests {
    // Queries against a live database are exercised in integration tests;
    // the row-mapping logic is unit-testable here.
    use super::*;

    fn account_row(role: &str) -> AccountRow {
        AccountRow {
            id: 1,
            name: "Ana".to_string(),
            lastname: "Lopez".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: None,
            role: role.to_string(),
            avatar_url: None,
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_account_row_maps_role() {
        let account = account_row("admin").into_account().unwrap();
        assert_eq!(account.role, tinta_core::Role::Admin);
        assert_eq!(account.id, AccountId::new(1));
    }

    #[test]
    fn test_account_row_rejects_unknown_role() {
        let result = account_row("owner").into_account();
        assert!(matches!(result.unwrap_err(), StoreError::Corrupt(_)));
    }

    #[test]
    fn test_identity_row_rejects_unknown_provider() {
        let row = IdentityRow {
            id: 1,
            account_id: 1,
            provider: "myspace".to_string(),
            subject_id: "999".to_string(),
            access_token: "tok".to_string(),
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            row.into_identity().unwrap_err(),
            StoreError::Corrupt(_)
        ));
    }
}
