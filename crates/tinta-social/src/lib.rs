//! Social authentication for tinta.
//!
//! Provider clients ([`providers::ProviderClient`]) talk OAuth2 to the
//! outside world; the [`IdentityResolver`] turns the profiles they fetch
//! into exactly one [`tinta_db::Account`] each, creating or linking
//! accounts under the store's uniqueness invariants.

pub mod error;
pub mod providers;
pub mod resolver;

// Re-export public API
pub use error::SocialError;
pub use providers::{DiscordProvider, ProviderClient, ProviderProfile, ProviderTokens};
pub use resolver::IdentityResolver;
