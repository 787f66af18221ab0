//! tinta Core Library
//!
//! Shared types for the tinta identity subsystem.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (AccountId, IdentityId)
//! - [`role`] - Account roles (admin, user)
//! - [`provider`] - External authentication providers
//!
//! # Example
//!
//! ```
//! use tinta_core::{AccountId, Provider, Role};
//!
//! let account_id = AccountId::new(1);
//! let role = Role::default();
//! assert_eq!(role, Role::User);
//! assert_eq!(Provider::Discord.as_str(), "discord");
//! ```

pub mod ids;
pub mod provider;
pub mod role;

// Re-export main types for convenient access
pub use ids::{AccountId, IdentityId, ParseIdError};
pub use provider::{ParseProviderError, Provider};
pub use role::{ParseRoleError, Role};
