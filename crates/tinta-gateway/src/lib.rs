//! Authentication facade for tinta.
//!
//! Ties the other crates together behind [`AuthGateway`]: local
//! registration and login, the Discord social login flow, bearer token
//! authentication, and role checks. Configuration comes from the
//! environment via [`GatewayConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tinta_db::MemoryStore;
//! use tinta_gateway::{AuthGateway, GatewayConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::from_env()?;
//! let gateway = AuthGateway::from_config(&config, Arc::new(MemoryStore::new()))?;
//!
//! let account = gateway.register("Ana", "Lopez", "ana@x.com", "hunter2!").await?;
//! let (_, token) = gateway.login("ana@x.com", "hunter2!").await?;
//! assert_eq!(gateway.authenticate(&token)?.account_id()?, account.id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;

// Re-export public API
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use gateway::AuthGateway;
