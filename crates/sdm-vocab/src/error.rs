//! # Error Types — Vocabulary Configuration
//!
//! Configuration errors raised while assembling or querying the registry.
//! These are programmer/operator errors: they abort initialization and are
//! never recovered. Value-shape problems belong to `sdm-validate` reports,
//! not here.

use thiserror::Error;

use sdm_core::{ModuleId, PropertyName, TypeName};

/// Errors from registry construction and lookup.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A type name was registered twice.
    #[error("duplicate type definition: {name}")]
    DuplicateType {
        /// The colliding type name.
        name: TypeName,
    },

    /// A module id was registered twice.
    #[error("duplicate capability module: {id}")]
    DuplicateModule {
        /// The colliding module id.
        id: ModuleId,
    },

    /// A lookup named a type that is not in the registry.
    #[error("unknown type: {name}")]
    UnknownType {
        /// The name that failed to resolve.
        name: String,
    },

    /// A definition names a parent that is not registered.
    #[error("type {type_name} extends unknown parent {parent}")]
    UnknownParent {
        /// The type with the bad parent reference.
        type_name: TypeName,
        /// The missing parent name.
        parent: TypeName,
    },

    /// A definition composes a module that is not registered.
    #[error("type {type_name} composes unknown module {module}")]
    UnknownModule {
        /// The type with the bad module reference.
        type_name: TypeName,
        /// The missing module id.
        module: ModuleId,
    },

    /// A definition's composed modules do not include one of its parent's.
    #[error("type {type_name} must compose module {module} inherited from {parent}")]
    MissingParentModule {
        /// The incomplete type.
        type_name: TypeName,
        /// The parent whose module is missing.
        parent: TypeName,
        /// The module the parent composes but the child does not.
        module: ModuleId,
    },

    /// Two composed modules declare the same property with different
    /// alternatives and no explicit override.
    #[error(
        "type {type_name}: property {property} declared with conflicting \
         alternatives by modules {kept_module} and {conflicting_module} \
         (set `overrides` on the more specific contract to narrow intentionally)"
    )]
    ConflictingContract {
        /// The type whose flattening hit the conflict.
        type_name: TypeName,
        /// The property declared twice.
        property: PropertyName,
        /// The more specific module, whose contract would win.
        kept_module: ModuleId,
        /// The less specific module with the differing contract.
        conflicting_module: ModuleId,
    },

    /// The parent chain of a type loops back on itself.
    #[error("inheritance cycle through type {type_name}")]
    InheritanceCycle {
        /// A type on the cycle.
        type_name: TypeName,
    },

    /// A property contract was declared with no alternatives.
    #[error("property {property} declares no type alternatives")]
    EmptyAlternatives {
        /// The contract with the empty union.
        property: PropertyName,
    },
}
