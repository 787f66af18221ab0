//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for tinta.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different ID types at compile time.
//!
//! Identifiers are opaque integers assigned by the credential store; they
//! are never generated client-side.
//!
//! # Example
//!
//! ```
//! use tinta_core::{AccountId, IdentityId};
//!
//! let account = AccountId::new(1);
//! let identity = IdentityId::new(1);
//!
//! // Type safety: cannot pass IdentityId where AccountId is expected
//! fn requires_account(id: AccountId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_account(account);
//! // requires_account(identity); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying integer parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an ID from a raw store-assigned integer.
            #[must_use]
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying integer.
            #[must_use]
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.parse::<i64>().map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    message: e.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for accounts.
    ///
    /// Identifies the canonical user identity record. Provides compile-time
    /// type safety to prevent confusion with other ID types.
    ///
    /// # Example
    ///
    /// ```
    /// use tinta_core::AccountId;
    ///
    /// let account_id = AccountId::new(42);
    /// assert_eq!(account_id.as_i64(), 42);
    ///
    /// // Parse from string (e.g. a token subject claim)
    /// let account_id: AccountId = "42".parse().unwrap();
    /// ```
    AccountId
);

define_id!(
    /// Strongly typed identifier for linked provider identities.
    ///
    /// Identifies the binding between an account and one external OAuth
    /// provider subject.
    IdentityId
);

#[cfg(test)]
mod tests {
    use super::*;

    mod account_id_tests {
        use super::*;

        #[test]
        fn test_new_preserves_value() {
            let id = AccountId::new(7);
            assert_eq!(id.as_i64(), 7);
        }

        #[test]
        fn test_display_returns_plain_integer() {
            let id = AccountId::new(123);
            assert_eq!(id.to_string(), "123");
        }

        #[test]
        fn test_from_i64() {
            let id: AccountId = 9.into();
            assert_eq!(id, AccountId::new(9));
        }

        #[test]
        fn test_ordering_follows_assignment_order() {
            assert!(AccountId::new(1) < AccountId::new(2));
        }
    }

    mod identity_id_tests {
        use super::*;

        #[test]
        fn test_new_preserves_value() {
            let id = IdentityId::new(3);
            assert_eq!(id.as_i64(), 3);
        }

        #[test]
        fn test_display_returns_plain_integer() {
            let id = IdentityId::new(55);
            assert_eq!(id.to_string(), "55");
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_account_id_serde_roundtrip() {
            let original = AccountId::new(12);
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: AccountId = serde_json::from_str(&json).unwrap();
            assert_eq!(original, deserialized);
        }

        #[test]
        fn test_serializes_as_plain_number() {
            let id = AccountId::new(42);
            let json = serde_json::to_string(&id).unwrap();
            // Should serialize as a bare number, not as an object
            assert_eq!(json, "42");
        }
    }

    mod from_str_tests {
        use super::*;

        #[test]
        fn test_parse_valid_id() {
            let id: AccountId = "17".parse().unwrap();
            assert_eq!(id.as_i64(), 17);
        }

        #[test]
        fn test_parse_invalid_id_returns_error() {
            let result: std::result::Result<AccountId, _> = "not-a-number".parse();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.id_type, "AccountId");
            assert!(!err.message.is_empty());
        }

        #[test]
        fn test_parse_empty_string_returns_error() {
            let result: std::result::Result<IdentityId, _> = "".parse();
            assert!(result.is_err());
            assert_eq!(result.unwrap_err().id_type, "IdentityId");
        }

        #[test]
        fn test_error_display() {
            let result: std::result::Result<AccountId, _> = "abc".parse();
            let err = result.unwrap_err();
            let display = err.to_string();
            assert!(display.contains("AccountId"));
            assert!(display.contains("Failed to parse"));
        }
    }

    mod hash_eq_tests {
        use super::*;
        use std::collections::HashMap;

        #[test]
        fn test_same_value_is_equal() {
            assert_eq!(AccountId::new(5), AccountId::new(5));
            assert_ne!(AccountId::new(5), AccountId::new(6));
        }

        #[test]
        fn test_can_use_as_hashmap_key() {
            let mut map: HashMap<AccountId, String> = HashMap::new();
            map.insert(AccountId::new(1), "ana".to_string());
            map.insert(AccountId::new(2), "bob".to_string());

            assert_eq!(map.get(&AccountId::new(1)), Some(&"ana".to_string()));
            assert_eq!(map.get(&AccountId::new(2)), Some(&"bob".to_string()));
        }

        #[test]
        fn test_copy_semantics() {
            let id1 = AccountId::new(8);
            let id2 = id1; // Copy
            assert_eq!(id1, id2);
        }
    }
}
