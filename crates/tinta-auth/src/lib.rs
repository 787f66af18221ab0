//! Session token and password hashing library for tinta.
//!
//! This crate provides:
//! - HS256 session token issuance and validation with a fixed claims shape
//! - Argon2id password hashing with OWASP-recommended parameters
//!
//! # Example
//!
//! ```rust
//! use chrono::Duration;
//! use tinta_auth::{PasswordHasher, SessionClaims, TokenService};
//! use tinta_core::{AccountId, Role};
//!
//! let hasher = PasswordHasher::with_params(4096, 1, 1).unwrap();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash));
//!
//! let tokens = TokenService::new(b"signing-secret", Duration::minutes(30));
//! let claims = SessionClaims::new(AccountId::new(1), "ana@x.com", Role::User);
//! let token = tokens.issue(claims, None).unwrap();
//! let decoded = tokens.validate(&token).unwrap();
//! assert_eq!(decoded.sub, "1");
//! ```

mod claims;
mod error;
mod jwt;
mod password;

// Re-export public API
pub use claims::SessionClaims;
pub use error::AuthError;
pub use jwt::TokenService;
pub use password::{hash_password, verify_password, PasswordHasher};
