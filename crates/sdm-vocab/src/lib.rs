//! # sdm-vocab — Vocabulary Model & Composed Registry
//!
//! Models a schema.org-style vocabulary as composable data:
//!
//! - [`PropertyContract`] — the union of value shapes one property accepts.
//! - [`CapabilityModule`] — a named bundle of contracts, one inheritance rung.
//! - [`EntityTypeDefinition`] — a vocabulary type: name, parent, external IRI,
//!   ordered composed modules, per-scope rule sets.
//! - [`VocabularyRegistry`] — built once from definitions, immutable after.
//!
//! ## Composition Is the Only Dispatch
//!
//! At build time each type's composed modules are flattened, most-specific
//! first, into a single ordered property table. Polymorphism is pure data:
//! the validator and serializer consult the same table; there is no per-type
//! override of validation or serialization logic.
//!
//! ## Crate Policy
//!
//! - Configuration problems (duplicate types, unknown parents, conflicting
//!   contracts) fail fast at build with structured errors — a broken
//!   vocabulary is a startup failure, never a render-time surprise.
//! - The built registry is `Send + Sync` and safe for unsynchronized
//!   concurrent reads.

pub mod contract;
pub mod definition;
pub mod error;
pub mod loader;
pub mod module;
pub mod registry;

pub use contract::{AlternativeKind, PropertyContract, TypeAlternative};
pub use definition::{EntityTypeDefinition, RuleSet};
pub use error::RegistryError;
pub use loader::{VocabLoadError, VocabularyLoader};
pub use module::CapabilityModule;
pub use registry::{ComposedProperties, RegistryBuilder, VocabularyRegistry};
