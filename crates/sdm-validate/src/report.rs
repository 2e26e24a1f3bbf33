//! # Validation Reports
//!
//! Structured advisories produced by validation. Each issue carries the
//! property it concerns and enough context to act on it; the report as a
//! whole renders line-per-issue for logs and editorial surfaces.

use std::fmt;

use serde::Serialize;

use sdm_core::{PropertyName, Scope, TypeName};

/// How severe an issue is for the consuming audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The markup is wrong or incomplete for the scope.
    Error,
    /// The markup would benefit from the property but is acceptable.
    Warning,
}

/// A single validation advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Issue {
    /// A present property is not declared by the type's composed table.
    UnknownProperty {
        /// The undeclared property.
        property: PropertyName,
    },

    /// A present value matched none of the contract's alternatives.
    TypeMismatch {
        /// The mismatched property.
        property: PropertyName,
        /// The contract's accepted alternatives.
        expected: String,
        /// The shape of the supplied value.
        actual: String,
    },

    /// A property the scope requires is missing or empty.
    RequiredMissing {
        /// The missing property.
        property: PropertyName,
        /// The scope requiring it.
        scope: Scope,
    },

    /// A property the scope recommends is missing.
    RecommendedMissing {
        /// The missing property.
        property: PropertyName,
        /// The scope recommending it.
        scope: Scope,
    },
}

impl Issue {
    /// The severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownProperty { .. }
            | Self::TypeMismatch { .. }
            | Self::RequiredMissing { .. } => Severity::Error,
            Self::RecommendedMissing { .. } => Severity::Warning,
        }
    }

    /// The property this issue concerns.
    pub fn property(&self) -> &PropertyName {
        match self {
            Self::UnknownProperty { property }
            | Self::TypeMismatch { property, .. }
            | Self::RequiredMissing { property, .. }
            | Self::RecommendedMissing { property, .. } => property,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty { property } => {
                write!(f, "  {property}: not a declared property of this type")
            }
            Self::TypeMismatch {
                property,
                expected,
                actual,
            } => {
                write!(f, "  {property}: expected {expected}, got {actual}")
            }
            Self::RequiredMissing { property, scope } => {
                write!(f, "  {property}: required by scope '{scope}' but missing or empty")
            }
            Self::RecommendedMissing { property, scope } => {
                write!(f, "  {property}: recommended by scope '{scope}' but missing")
            }
        }
    }
}

/// The accumulated outcome of validating one instance.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    type_name: TypeName,
    issues: Vec<Issue>,
}

impl ValidationReport {
    /// An empty report for an instance of the given type.
    pub fn new(type_name: TypeName) -> Self {
        Self {
            type_name,
            issues: Vec::new(),
        }
    }

    /// The validated instance's type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Record an issue.
    pub(crate) fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// All issues, in discovery order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    /// Warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Whether the instance validated without any advisories.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "{}: valid", self.type_name);
        }
        writeln!(
            f,
            "{}: {} error(s), {} warning(s)",
            self.type_name,
            self.error_count(),
            self.warning_count()
        )?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
