//! # Vocabulary Registry — Build-Time Composition
//!
//! [`RegistryBuilder`] accumulates capability modules and entity type
//! definitions, then `build()` produces an immutable [`VocabularyRegistry`]:
//! every type gets a flattened property table (most-specific module first)
//! and a precomputed ancestor chain.
//!
//! ## Build-Time Guarantees
//!
//! - Type names and module ids are unique.
//! - Every parent and composed module resolves.
//! - A type composes every module its parent composes (so the flattened
//!   table always contains the full transitive ancestor surface).
//! - Two modules declaring the same property with different alternatives
//!   is rejected unless the more specific contract is marked as an
//!   intentional override.
//! - Parent chains are acyclic.
//!
//! ## Thread Safety
//!
//! The built registry is `Send + Sync`; construction happens once at
//! process start, and all later access is read-only with no locking.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sdm_core::{ModuleId, PropertyName, Scope, TypeName};

use crate::contract::PropertyContract;
use crate::definition::{EntityTypeDefinition, RuleSet};
use crate::error::RegistryError;
use crate::module::CapabilityModule;

/// The flattened, ordered property table of one type.
///
/// Order is most-specific-first: a subtype's re-declaration of an inherited
/// property masks the ancestor's and keeps the subtype's position.
#[derive(Debug, Clone)]
pub struct ComposedProperties {
    ordered: Vec<Arc<PropertyContract>>,
    index: HashMap<PropertyName, usize>,
}

impl ComposedProperties {
    /// Iterate contracts in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyContract>> {
        self.ordered.iter()
    }

    /// Look up a contract by property name.
    pub fn get(&self, name: &str) -> Option<&Arc<PropertyContract>> {
        self.index.get(name).map(|&i| &self.ordered[i])
    }

    /// Whether the table declares the property.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// One resolved type: its definition, flattened table, and ancestor chain.
#[derive(Debug)]
struct TypeRecord {
    definition: EntityTypeDefinition,
    table: ComposedProperties,
    /// Ancestors nearest-first, not including the type itself.
    ancestors: Vec<TypeName>,
}

/// Mutable accumulation phase for registry construction.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    modules: HashMap<ModuleId, Arc<CapabilityModule>>,
    definitions: Vec<EntityTypeDefinition>,
    names: HashSet<TypeName>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability module. Duplicate ids fail fast.
    pub fn register_module(
        &mut self,
        module: CapabilityModule,
    ) -> Result<&mut Self, RegistryError> {
        let id = module.id().clone();
        if self.modules.contains_key(&id) {
            return Err(RegistryError::DuplicateModule { id });
        }
        self.modules.insert(id, Arc::new(module));
        Ok(self)
    }

    /// Register an entity type definition. Duplicate names fail fast.
    pub fn register_type(
        &mut self,
        definition: EntityTypeDefinition,
    ) -> Result<&mut Self, RegistryError> {
        if self.names.contains(definition.name()) {
            return Err(RegistryError::DuplicateType {
                name: definition.name().clone(),
            });
        }
        self.names.insert(definition.name().clone());
        self.definitions.push(definition);
        Ok(self)
    }

    /// Resolve all definitions into an immutable registry.
    pub fn build(self) -> Result<VocabularyRegistry, RegistryError> {
        let by_name: HashMap<&TypeName, &EntityTypeDefinition> =
            self.definitions.iter().map(|d| (d.name(), d)).collect();

        // Structural checks before any flattening.
        for def in &self.definitions {
            for module_id in def.composed_modules() {
                if !self.modules.contains_key(module_id) {
                    return Err(RegistryError::UnknownModule {
                        type_name: def.name().clone(),
                        module: module_id.clone(),
                    });
                }
            }
            if let Some(parent_name) = def.parent() {
                let parent = by_name.get(parent_name).ok_or_else(|| {
                    RegistryError::UnknownParent {
                        type_name: def.name().clone(),
                        parent: parent_name.clone(),
                    }
                })?;
                // Direct-parent inclusion gives transitive inclusion by
                // induction, since every parent passes the same check.
                for module_id in parent.composed_modules() {
                    if !def.composed_modules().contains(module_id) {
                        return Err(RegistryError::MissingParentModule {
                            type_name: def.name().clone(),
                            parent: parent_name.clone(),
                            module: module_id.clone(),
                        });
                    }
                }
            }
        }

        let mut records = HashMap::with_capacity(self.definitions.len());
        for def in &self.definitions {
            let ancestors = ancestor_chain(def, &by_name)?;
            let table = flatten(def, &self.modules)?;
            tracing::debug!(
                r#type = %def.name(),
                properties = table.len(),
                ancestors = ancestors.len(),
                "composed property table built"
            );
            records.insert(
                def.name().clone(),
                TypeRecord {
                    definition: def.clone(),
                    table,
                    ancestors,
                },
            );
        }

        tracing::info!(
            types = records.len(),
            modules = self.modules.len(),
            "vocabulary registry built"
        );
        Ok(VocabularyRegistry {
            records,
            modules: self.modules,
        })
    }
}

/// Walk the parent chain, nearest-first, rejecting cycles.
fn ancestor_chain(
    def: &EntityTypeDefinition,
    by_name: &HashMap<&TypeName, &EntityTypeDefinition>,
) -> Result<Vec<TypeName>, RegistryError> {
    let mut chain = Vec::new();
    let mut seen: HashSet<&TypeName> = HashSet::new();
    seen.insert(def.name());

    let mut current = def.parent();
    while let Some(parent_name) = current {
        if !seen.insert(parent_name) {
            return Err(RegistryError::InheritanceCycle {
                type_name: parent_name.clone(),
            });
        }
        chain.push(parent_name.clone());
        // Parent existence was checked structurally; a missing entry here
        // means the chain left the registered set mid-walk.
        let parent = by_name.get(parent_name).ok_or_else(|| {
            RegistryError::UnknownParent {
                type_name: def.name().clone(),
                parent: parent_name.clone(),
            }
        })?;
        current = parent.parent();
    }
    Ok(chain)
}

/// Flatten composed modules, most-specific first, into one ordered table.
fn flatten(
    def: &EntityTypeDefinition,
    modules: &HashMap<ModuleId, Arc<CapabilityModule>>,
) -> Result<ComposedProperties, RegistryError> {
    let mut ordered: Vec<Arc<PropertyContract>> = Vec::new();
    let mut index: HashMap<PropertyName, usize> = HashMap::new();
    let mut provider: HashMap<PropertyName, ModuleId> = HashMap::new();

    for module_id in def.composed_modules() {
        let module = match modules.get(module_id) {
            Some(module) => module,
            // Checked before flattening; unreachable in practice.
            None => {
                return Err(RegistryError::UnknownModule {
                    type_name: def.name().clone(),
                    module: module_id.clone(),
                })
            }
        };
        for contract in module.properties() {
            match index.get(contract.name()) {
                None => {
                    index.insert(contract.name().clone(), ordered.len());
                    provider.insert(contract.name().clone(), module_id.clone());
                    ordered.push(Arc::clone(contract));
                }
                Some(&kept_at) => {
                    let kept = &ordered[kept_at];
                    if kept.same_alternatives(contract) || kept.overrides() {
                        // Most-specific declaration wins; a later identical
                        // or explicitly-overridden declaration is ignored.
                        continue;
                    }
                    let kept_module = provider
                        .get(contract.name())
                        .cloned()
                        .unwrap_or_else(|| module_id.clone());
                    return Err(RegistryError::ConflictingContract {
                        type_name: def.name().clone(),
                        property: contract.name().clone(),
                        kept_module,
                        conflicting_module: module_id.clone(),
                    });
                }
            }
        }
    }

    Ok(ComposedProperties { ordered, index })
}

/// The immutable, process-wide vocabulary registry.
///
/// Built once at initialization and shared (e.g. behind an `Arc`) across
/// concurrent readers without locking.
#[derive(Debug)]
pub struct VocabularyRegistry {
    records: HashMap<TypeName, TypeRecord>,
    modules: HashMap<ModuleId, Arc<CapabilityModule>>,
}

impl VocabularyRegistry {
    /// Resolve a type definition by name.
    pub fn resolve(&self, name: &str) -> Result<&EntityTypeDefinition, RegistryError> {
        self.records
            .get(name)
            .map(|r| &r.definition)
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })
    }

    /// The flattened property table of a type.
    pub fn composed_properties(&self, name: &str) -> Result<&ComposedProperties, RegistryError> {
        self.records
            .get(name)
            .map(|r| &r.table)
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })
    }

    /// A type's ancestors, nearest-first, not including itself.
    pub fn ancestors(&self, name: &str) -> Result<&[TypeName], RegistryError> {
        self.records
            .get(name)
            .map(|r| r.ancestors.as_slice())
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Whether `candidate` is `ancestor` or one of its descendants.
    ///
    /// The candidate must resolve; the ancestor name is compared by walk,
    /// so contracts may reference types outside the registered subset.
    pub fn is_subtype(&self, candidate: &str, ancestor: &str) -> Result<bool, RegistryError> {
        if candidate == ancestor {
            // Still a programmer error if the candidate is unknown.
            self.resolve(candidate)?;
            return Ok(true);
        }
        let chain = self.ancestors(candidate)?;
        Ok(chain.iter().any(|t| t.as_str() == ancestor))
    }

    /// Look up the rule set of a type for a scope. An undeclared scope is
    /// an empty policy, not an error.
    pub fn rule_set(&self, name: &str, scope: &Scope) -> Result<Option<&RuleSet>, RegistryError> {
        Ok(self.resolve(name)?.rule_set(scope))
    }

    /// A registered capability module by id.
    pub fn module(&self, id: &str) -> Option<&Arc<CapabilityModule>> {
        self.modules.get(id)
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<&TypeName> {
        let mut names: Vec<&TypeName> = self.records.keys().collect();
        names.sort();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
