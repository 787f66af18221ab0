//! Data models owned by the credential store.

pub mod account;
pub mod linked_identity;

pub use account::{Account, NewAccount};
pub use linked_identity::{LinkedIdentity, NewLinkedIdentity};
