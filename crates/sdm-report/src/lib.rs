//! # sdm-report — Completeness Scoring
//!
//! Coarse editorial grades computed from field presence, independent of the
//! validator's contract checks. A [`SetupChecklist`] names the fields an
//! editorial team cares about; each content source is graded by how many of
//! those fields any of its instances carry, and sources aggregate into a
//! cross-source tally for dashboard surfaces.

pub mod checklist;
pub mod grade;

pub use checklist::{AggregateReport, FieldPresence, SetupChecklist, SourceScore};
pub use grade::grade_index;
