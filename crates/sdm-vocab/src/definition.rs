//! # Entity Type Definitions & Rule Sets
//!
//! An entity type definition ties a vocabulary type name to its parent,
//! external IRI, the ordered list of capability modules it composes
//! (most-specific first), and zero or more scoped rule sets.
//!
//! Rule sets are declared complete per type — the vocabulary generator
//! emits full required/recommended lists on every concrete type, so no
//! ancestor merging happens at build time.

use std::collections::BTreeSet;

use sdm_core::{ModuleId, PropertyName, Scope, TypeName};

/// An audience-specific validation policy for one type.
#[derive(Debug, Clone)]
pub struct RuleSet {
    scope: Scope,
    required: BTreeSet<PropertyName>,
    recommended: BTreeSet<PropertyName>,
}

impl RuleSet {
    /// Create a rule set for a scope.
    pub fn new(
        scope: Scope,
        required: impl IntoIterator<Item = PropertyName>,
        recommended: impl IntoIterator<Item = PropertyName>,
    ) -> Self {
        Self {
            scope,
            required: required.into_iter().collect(),
            recommended: recommended.into_iter().collect(),
        }
    }

    /// The scope this policy applies to.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Properties the audience requires.
    pub fn required(&self) -> impl Iterator<Item = &PropertyName> {
        self.required.iter()
    }

    /// Properties the audience recommends.
    pub fn recommended(&self) -> impl Iterator<Item = &PropertyName> {
        self.recommended.iter()
    }
}

/// A vocabulary type: name, parent, external IRI, composed modules, and
/// per-scope rule sets.
#[derive(Debug, Clone)]
pub struct EntityTypeDefinition {
    name: TypeName,
    parent: Option<TypeName>,
    external_iri: String,
    description: String,
    composed_modules: Vec<ModuleId>,
    rule_sets: Vec<RuleSet>,
}

impl EntityTypeDefinition {
    /// Create a definition. `parent` is `None` only for the vocabulary
    /// root; `composed_modules` is ordered most-specific first and must
    /// transitively include every module of the parent (checked at
    /// registry build).
    pub fn new(
        name: TypeName,
        parent: Option<TypeName>,
        external_iri: impl Into<String>,
        description: impl Into<String>,
        composed_modules: Vec<ModuleId>,
    ) -> Self {
        Self {
            name,
            parent,
            external_iri: external_iri.into(),
            description: description.into(),
            composed_modules,
            rule_sets: Vec::new(),
        }
    }

    /// Attach a scoped rule set.
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_sets.push(rule_set);
        self
    }

    /// The type name.
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// The parent type, if any.
    pub fn parent(&self) -> Option<&TypeName> {
        self.parent.as_ref()
    }

    /// The external IRI identifying the type (e.g.
    /// `https://schema.org/CampingPitch`).
    pub fn external_iri(&self) -> &str {
        &self.external_iri
    }

    /// The type's documentation string.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Composed module ids, most-specific first.
    pub fn composed_modules(&self) -> &[ModuleId] {
        &self.composed_modules
    }

    /// Look up the rule set for a scope. Absence is an empty policy, not
    /// an error.
    pub fn rule_set(&self, scope: &Scope) -> Option<&RuleSet> {
        self.rule_sets.iter().find(|rs| rs.scope() == scope)
    }

    /// All declared rule sets.
    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> PropertyName {
        PropertyName::new(name).unwrap()
    }

    #[test]
    fn test_rule_set_lookup() {
        let def = EntityTypeDefinition::new(
            TypeName::new("CampingPitch").unwrap(),
            Some(TypeName::new("Accommodation").unwrap()),
            "https://schema.org/CampingPitch",
            "An individual place for overnight stay in the outdoors.",
            vec![
                ModuleId::new("camping-pitch").unwrap(),
                ModuleId::new("accommodation").unwrap(),
                ModuleId::new("place").unwrap(),
                ModuleId::new("thing").unwrap(),
            ],
        )
        .with_rule_set(RuleSet::new(
            Scope::new("google").unwrap(),
            vec![prop("description"), prop("name")],
            vec![prop("image"), prop("url")],
        ));

        let google = Scope::new("google").unwrap();
        let rules = def.rule_set(&google).unwrap();
        assert_eq!(rules.required().count(), 2);
        assert_eq!(rules.recommended().count(), 2);

        let bing = Scope::new("bing").unwrap();
        assert!(def.rule_set(&bing).is_none());
    }

    #[test]
    fn test_module_order_preserved() {
        let def = EntityTypeDefinition::new(
            TypeName::new("Place").unwrap(),
            Some(TypeName::new("Thing").unwrap()),
            "https://schema.org/Place",
            "Entities with a physical extension.",
            vec![
                ModuleId::new("place").unwrap(),
                ModuleId::new("thing").unwrap(),
            ],
        );
        let ids: Vec<&str> = def.composed_modules().iter().map(|m| m.as_str()).collect();
        assert_eq!(ids, vec!["place", "thing"]);
    }
}
