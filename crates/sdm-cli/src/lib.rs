//! # sdm-cli — Structured Data Command-Line Interface
//!
//! Thin front-end over the SDM crates: load a vocabulary directory, inspect
//! its types, validate instance documents under an audience scope, and
//! render JSON-LD.
//!
//! ## Subcommands
//!
//! - `types` — List registered entity types
//! - `show` — Print a type's flattened property table
//! - `validate` — Validate an instance document, optionally under a scope
//! - `render` — Render an instance document as JSON-LD
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no business logic here.
//! - Instance documents are plain JSON; the [`input`] adapter coerces JSON
//!   primitives to typed scalars using the target type's contracts.

pub mod input;
pub mod load;
pub mod render;
pub mod show;
pub mod types;
pub mod validate;
