//! # Error Types — Core Primitives
//!
//! Errors raised while constructing core primitives. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Value-shape problems during validation are *not* errors at this layer;
//! they are accumulated into a report by `sdm-validate`. This module only
//! covers construction of identifiers and scalars, which are programmer
//! errors and fail fast.

use thiserror::Error;

/// Errors from core primitive construction.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An identifier was constructed from an empty or blank string.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Which identifier newtype rejected the input.
        kind: &'static str,
    },

    /// A datetime string could not be parsed, or used a non-UTC offset.
    #[error("invalid datetime {input:?}: {reason}")]
    InvalidDateTime {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },
}
