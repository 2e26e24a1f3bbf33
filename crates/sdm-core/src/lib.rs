//! # sdm-core — Foundational Types for the SDM Stack
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! the rest of the stack composes: identifier newtypes for the vocabulary
//! namespace, scalar kinds and values, and the per-render entity instance
//! graph that validation and serialization consume.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for vocabulary identifiers.** `TypeName`,
//!    `PropertyName`, `ModuleId`, `Scope` — all newtypes with validated
//!    constructors. No bare strings for identifiers.
//!
//! 2. **Scalars carry their kind.** `ScalarValue` is an enum over the seven
//!    scalar kinds; kind checks are exhaustive `match`es, and the only
//!    widening is `Number` admitting `Integer` (schema.org's Number ⊇ Integer).
//!
//! 3. **UTC-only datetimes.** `ScalarValue::DateTime` holds a
//!    `chrono::DateTime<Utc>` and renders with a `Z` suffix at seconds
//!    precision. Local offsets never enter the document.
//!
//! 4. **Instances are per-render graphs.** `EntityInstance` values are held
//!    behind `Rc<RefCell<_>>` handles so content adapters can build shared
//!    and self-referential graphs; instances carry no persisted identity
//!    and are dropped at the end of a render.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod instance;
pub mod scalar;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{ModuleId, PropertyName, Scope, TypeName};
pub use instance::{EntityInstance, InstanceHandle, Value};
pub use scalar::{ScalarKind, ScalarValue};
