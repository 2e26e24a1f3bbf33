//! The grade curve.
//!
//! One formula maps a presence count onto a grade scale:
//!
//! ```text
//! index = round(num_grades - present * num_grades / num_fields)
//! ```
//!
//! with half-away-from-zero rounding, clamped into `[0, num_grades - 1]`.
//! Index `0` is the best grade. All fields present lands on `0`; none
//! present lands on the worst grade.

/// Map a presence count to a grade index.
///
/// `present` is clamped to `num_fields`. A checklist with no fields or a
/// scale with no grades yields index `0`.
pub fn grade_index(present: usize, num_fields: usize, num_grades: usize) -> usize {
    if num_fields == 0 || num_grades == 0 {
        return 0;
    }
    let present = present.min(num_fields) as f64;
    let grades = num_grades as f64;
    let raw = grades - (present * grades) / num_fields as f64;
    // f64::round rounds halves away from zero.
    let index = raw.round();
    (index.max(0.0) as usize).min(num_grades - 1)
}
