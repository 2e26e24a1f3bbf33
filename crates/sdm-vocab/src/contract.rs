//! # Property Contracts
//!
//! A property contract records the union of value shapes one property
//! accepts: an ordered, non-empty list of [`TypeAlternative`]s. A supplied
//! value is valid if it matches *any* alternative.
//!
//! Alternatives use the vocabulary's own notation: a scalar keyword
//! (`Text`, `URL`, `Number`, `Integer`, `Boolean`, `DateTime`, `Date`) or a
//! type name as a nested-entity reference, with a `[]` suffix for repeated
//! occurrence (`Text[]`, `Place[]`).

use sdm_core::{CoreError, PropertyName, ScalarKind, TypeName};

use crate::error::RegistryError;

/// What one alternative accepts: a scalar kind or a nested-entity reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlternativeKind {
    /// A scalar of the given kind.
    Scalar(ScalarKind),
    /// A nested instance of the named type or any of its descendants.
    Reference(TypeName),
}

/// One accepted value shape for a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlternative {
    /// The bare kind an element must match.
    pub kind: AlternativeKind,
    /// Whether the alternative matches a sequence (every element matching
    /// the bare kind) instead of a single value.
    pub repeated: bool,
}

impl TypeAlternative {
    /// A single scalar alternative.
    pub fn scalar(kind: ScalarKind) -> Self {
        Self {
            kind: AlternativeKind::Scalar(kind),
            repeated: false,
        }
    }

    /// A repeated scalar alternative.
    pub fn scalar_list(kind: ScalarKind) -> Self {
        Self {
            kind: AlternativeKind::Scalar(kind),
            repeated: true,
        }
    }

    /// A single nested-entity alternative.
    pub fn reference(type_name: TypeName) -> Self {
        Self {
            kind: AlternativeKind::Reference(type_name),
            repeated: false,
        }
    }

    /// A repeated nested-entity alternative.
    pub fn reference_list(type_name: TypeName) -> Self {
        Self {
            kind: AlternativeKind::Reference(type_name),
            repeated: true,
        }
    }

    /// Parse vocabulary notation: a scalar keyword or a type name, with an
    /// optional `[]` suffix.
    pub fn parse(notation: &str) -> Result<Self, CoreError> {
        let (bare, repeated) = match notation.strip_suffix("[]") {
            Some(bare) => (bare, true),
            None => (notation, false),
        };
        let kind = match ScalarKind::from_keyword(bare) {
            Some(scalar) => AlternativeKind::Scalar(scalar),
            None => AlternativeKind::Reference(TypeName::new(bare)?),
        };
        Ok(Self { kind, repeated })
    }
}

impl std::fmt::Display for TypeAlternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AlternativeKind::Scalar(kind) => write!(f, "{kind}")?,
            AlternativeKind::Reference(name) => write!(f, "{name}")?,
        }
        if self.repeated {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// One property's accepted value shapes. Immutable after registry build.
#[derive(Debug, Clone)]
pub struct PropertyContract {
    name: PropertyName,
    alternatives: Vec<TypeAlternative>,
    description: String,
    overrides: bool,
}

impl PropertyContract {
    /// Create a contract. The alternative union must be non-empty.
    pub fn new(
        name: PropertyName,
        alternatives: Vec<TypeAlternative>,
        description: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        if alternatives.is_empty() {
            return Err(RegistryError::EmptyAlternatives { property: name });
        }
        Ok(Self {
            name,
            alternatives,
            description: description.into(),
            overrides: false,
        })
    }

    /// Mark the contract as an intentional narrowing of an inherited
    /// declaration. Without this, re-declaring a property with different
    /// alternatives in a more specific module is a build error.
    pub fn with_override(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// The property name.
    pub fn name(&self) -> &PropertyName {
        &self.name
    }

    /// The accepted alternatives, in declaration order.
    pub fn alternatives(&self) -> &[TypeAlternative] {
        &self.alternatives
    }

    /// The property's documentation string.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this contract intentionally narrows an inherited one.
    pub fn overrides(&self) -> bool {
        self.overrides
    }

    /// Whether another contract accepts exactly the same alternatives.
    pub fn same_alternatives(&self, other: &PropertyContract) -> bool {
        self.alternatives == other.alternatives
    }

    /// Human-readable union for mismatch messages, e.g. `Text, Text[], URL`.
    pub fn expected_summary(&self) -> String {
        let parts: Vec<String> = self.alternatives.iter().map(|a| a.to_string()).collect();
        parts.join(", ")
    }
}
