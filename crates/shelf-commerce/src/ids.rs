//! Newtype IDs for type-safe identifiers.
//!
//! The bookstore API is not consistent about identifier types: some
//! resources come back with numeric ids, others with strings. Every id is
//! held as a string and deserialized from either form, so a `BookId` read
//! from `/books` can be sent back in a transaction request unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire form of an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a book in the catalog.
    BookId
);
define_id!(
    /// Identifier of a genre.
    GenreId
);
define_id!(
    /// Identifier of a completed transaction.
    TransactionId
);
define_id!(
    /// Identifier of a line inside a transaction.
    TransactionItemId
);
define_id!(
    /// Identifier of a registered user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = BookId::new("book-123");
        assert_eq!(id.as_str(), "book-123");
    }

    #[test]
    fn test_id_from_str() {
        let id: BookId = "book-456".into();
        assert_eq!(id.as_str(), "book-456");
    }

    #[test]
    fn test_id_display() {
        let id = TransactionId::new("tx-789");
        assert_eq!(format!("{}", id), "tx-789");
    }

    #[test]
    fn test_id_deserializes_from_number_or_string() {
        let from_number: BookId = serde_json::from_str("42").unwrap();
        let from_text: BookId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let json = serde_json::to_string(&GenreId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }

    #[test]
    fn test_id_rejects_other_json() {
        let result: Result<BookId, _> = serde_json::from_str("true");
        assert!(result.is_err());
    }
}
