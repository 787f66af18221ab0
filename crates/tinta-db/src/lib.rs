//! Credential storage for tinta.
//!
//! This crate owns the `Account` and `LinkedIdentity` records and the
//! [`CredentialStore`] trait through which everything else reads and
//! writes them. Two implementations ship:
//!
//! - [`PgStore`] — Postgres via sqlx, with embedded migrations
//! - [`MemoryStore`] — in-memory, used by tests
//!
//! # Example
//!
//! ```rust,no_run
//! use tinta_db::{CredentialStore, MemoryStore, NewAccount};
//!
//! # async fn example() -> Result<(), tinta_db::StoreError> {
//! let store = MemoryStore::new();
//! let account = store
//!     .create_account(NewAccount::local("Ana", "Lopez", "ana@x.com", "$argon2id$..."))
//!     .await?;
//! assert_eq!(account.id.as_i64(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

// Re-export public API
pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{Account, LinkedIdentity, NewAccount, NewLinkedIdentity};
pub use postgres::PgStore;
pub use store::CredentialStore;
