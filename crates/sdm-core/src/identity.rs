//! # Vocabulary Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the vocabulary —
//! you cannot pass a `ModuleId` where a `TypeName` is expected, and a
//! validation `Scope` is never confused with a property name.
//!
//! All four wrap a non-empty string. `Scope` is deliberately open: scopes
//! are data, not a closed enum, so new audiences ("google", "bing",
//! "editorial") need no code changes.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! string_identifier {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Construct from a string, rejecting empty or blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(CoreError::EmptyIdentifier { kind: $label });
                }
                Ok(Self(value))
            }

            /// Access the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier!(
    /// Name of a vocabulary type (e.g., `"Place"`, `"SoftwareApplication"`).
    TypeName,
    "type name"
);

string_identifier!(
    /// Name of a property within a type's composed table (e.g., `"name"`).
    PropertyName,
    "property name"
);

string_identifier!(
    /// Identifier of a capability module (one inheritance rung's bundle).
    ModuleId,
    "module id"
);

string_identifier!(
    /// An audience-specific validation policy identifier (e.g., `"google"`).
    ///
    /// Open string namespace — undeclared scopes resolve to an empty rule
    /// set, never an error.
    Scope,
    "scope"
);
