//! # The Validator
//!
//! Checks one instance against its type's composed property table and, if a
//! scope is active, against that scope's rule set. All checks run to
//! completion — issues accumulate, nothing short-circuits.
//!
//! Nested instances are checked for reference-type conformance only; each
//! rendered instance is validated on its own, so no cycle guard is needed
//! here.

use sdm_core::{EntityInstance, Scope, Value};
use sdm_vocab::{AlternativeKind, RegistryError, TypeAlternative, VocabularyRegistry};

use crate::report::{Issue, ValidationReport};

/// Validates instances against an immutable registry.
///
/// Pure function of (instance, registry): no shared mutable state, safe to
/// call concurrently per request.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r VocabularyRegistry,
}

impl<'r> Validator<'r> {
    /// Create a validator over a built registry.
    pub fn new(registry: &'r VocabularyRegistry) -> Self {
        Self { registry }
    }

    /// Validate an instance, optionally under a scope.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration problems: the instance (or a
    /// nested instance) names a type the registry does not know. Every
    /// value-shape problem is an entry in the returned report.
    pub fn validate(
        &self,
        instance: &EntityInstance,
        scope: Option<&Scope>,
    ) -> Result<ValidationReport, RegistryError> {
        let type_name = instance.type_name();
        let table = self.registry.composed_properties(type_name.as_str())?;
        let mut report = ValidationReport::new(type_name.clone());

        for (name, value) in instance.properties() {
            match table.get(name.as_str()) {
                None => report.push(Issue::UnknownProperty {
                    property: name.clone(),
                }),
                Some(contract) => {
                    let mut matched = false;
                    for alternative in contract.alternatives() {
                        if self.matches(value, alternative)? {
                            matched = true;
                            break;
                        }
                    }
                    if !matched {
                        report.push(Issue::TypeMismatch {
                            property: name.clone(),
                            expected: contract.expected_summary(),
                            actual: shape_of(value),
                        });
                    }
                }
            }
        }

        if let Some(scope) = scope {
            // An undeclared scope is an empty policy, never a failure.
            if let Some(rules) = self.registry.rule_set(type_name.as_str(), scope)? {
                for required in rules.required() {
                    let missing = instance
                        .get(required.as_str())
                        .map_or(true, Value::is_empty);
                    if missing {
                        report.push(Issue::RequiredMissing {
                            property: required.clone(),
                            scope: scope.clone(),
                        });
                    }
                }
                for recommended in rules.recommended() {
                    if instance.get(recommended.as_str()).is_none() {
                        report.push(Issue::RecommendedMissing {
                            property: recommended.clone(),
                            scope: scope.clone(),
                        });
                    }
                }
            }
        }

        if !report.is_clean() {
            tracing::warn!(
                r#type = %type_name,
                errors = report.error_count(),
                warnings = report.warning_count(),
                "instance validated with advisories"
            );
        }
        Ok(report)
    }

    /// Whether a value matches one alternative.
    fn matches(
        &self,
        value: &Value,
        alternative: &TypeAlternative,
    ) -> Result<bool, RegistryError> {
        if alternative.repeated {
            match value {
                Value::List(items) => {
                    for item in items {
                        if !self.matches_bare(item, &alternative.kind)? {
                            return Ok(false);
                        }
                    }
                    // Zero elements is a valid repeated occurrence.
                    Ok(true)
                }
                _ => Ok(false),
            }
        } else {
            self.matches_bare(value, &alternative.kind)
        }
    }

    /// Whether a single (non-sequence) value matches a bare kind.
    fn matches_bare(
        &self,
        value: &Value,
        kind: &AlternativeKind,
    ) -> Result<bool, RegistryError> {
        match (value, kind) {
            (Value::Scalar(scalar), AlternativeKind::Scalar(expected)) => {
                Ok(expected.admits(scalar))
            }
            (Value::Entity(handle), AlternativeKind::Reference(target)) => {
                let nested_type = handle.borrow().type_name().clone();
                self.registry
                    .is_subtype(nested_type.as_str(), target.as_str())
            }
            _ => Ok(false),
        }
    }
}

/// Describe a value's shape for mismatch messages.
fn shape_of(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar.kind().to_string(),
        Value::Entity(handle) => format!("{} instance", handle.borrow().type_name()),
        Value::List(items) if items.is_empty() => "empty sequence".to_string(),
        Value::List(items) => {
            let mut shapes: Vec<String> = Vec::new();
            for item in items {
                let shape = shape_of(item);
                if !shapes.contains(&shape) {
                    shapes.push(shape);
                }
            }
            format!("sequence of {}", shapes.join(", "))
        }
    }
}
