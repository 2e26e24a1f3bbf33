//! # sdm-validate — Instance Validation
//!
//! Checks an entity instance's present values against its type's composed
//! property table, and — when a scope is supplied — against that scope's
//! required/recommended rule set.
//!
//! ## Error Discipline
//!
//! Value-shape problems (unknown properties, type mismatches, missing
//! required/recommended properties) are **data** problems: they accumulate
//! into a [`ValidationReport`] and never cross the `validate()` boundary as
//! `Err`. Markup is still emitted best-effort; the report feeds dashboards
//! and editorial tooling.
//!
//! Configuration problems (an instance naming an unregistered type) are
//! programmer errors and abort with a [`sdm_vocab::RegistryError`].

pub mod report;
pub mod validator;

pub use report::{Issue, Severity, ValidationReport};
pub use validator::Validator;
