//! # sdm-serialize — JSON-LD Rendering
//!
//! Turns a per-render entity instance graph into a JSON-LD document:
//! `@context` at the root only, `@type` first on every node, then the
//! instance's present properties re-ordered by the type's composed
//! declaration table.
//!
//! ## Cycle Guard
//!
//! Instance graphs may share nodes and close cycles. The renderer tracks
//! handle identity along the active recursion path: revisiting a node that
//! is still being rendered emits a reference stub instead of recursing.
//! Sharing without a cycle renders the node fully at each site.

pub mod jsonld;

pub use jsonld::to_json_ld;
