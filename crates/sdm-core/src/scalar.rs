//! # Scalar Kinds and Values
//!
//! The seven scalar kinds a property contract can accept, and the typed
//! scalar values an entity instance carries for them.
//!
//! ## Matching
//!
//! A kind admits a value by exact kind, with one widening: `Number` admits
//! `Integer` values, mirroring the vocabulary's Number ⊇ Integer relation.
//! `Integer` does not admit `Number` — fractional input never silently
//! narrows.
//!
//! ## Datetime Discipline
//!
//! Datetimes are UTC-only and render as `YYYY-MM-DDTHH:MM:SSZ`. Inputs with
//! non-`Z` offsets are rejected at construction, so every document emits a
//! deterministic representation of the same instant.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The scalar kinds a property contract alternative can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Free text.
    Text,
    /// An absolute URL.
    Url,
    /// A (possibly fractional) number. Admits `Integer` values.
    Number,
    /// A whole number.
    Integer,
    /// A boolean flag.
    Boolean,
    /// A UTC datetime at seconds precision.
    DateTime,
    /// A calendar date.
    Date,
}

impl ScalarKind {
    /// Whether a scalar value satisfies this kind.
    pub fn admits(&self, value: &ScalarValue) -> bool {
        match (self, value) {
            (Self::Text, ScalarValue::Text(_)) => true,
            (Self::Url, ScalarValue::Url(_)) => true,
            (Self::Number, ScalarValue::Number(_)) => true,
            // Number ⊇ Integer.
            (Self::Number, ScalarValue::Integer(_)) => true,
            (Self::Integer, ScalarValue::Integer(_)) => true,
            (Self::Boolean, ScalarValue::Boolean(_)) => true,
            (Self::DateTime, ScalarValue::DateTime(_)) => true,
            (Self::Date, ScalarValue::Date(_)) => true,
            _ => false,
        }
    }

    /// Parse a kind from its vocabulary keyword, if it names one.
    ///
    /// Anything else is a reference to another vocabulary type, which is
    /// the caller's concern.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Text" => Some(Self::Text),
            "URL" => Some(Self::Url),
            "Number" => Some(Self::Number),
            "Integer" => Some(Self::Integer),
            "Boolean" => Some(Self::Boolean),
            "DateTime" => Some(Self::DateTime),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "Text",
            Self::Url => "URL",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
        };
        f.write_str(s)
    }
}

/// A typed scalar value supplied for a property.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Free text.
    Text(String),
    /// An absolute URL, kept as a string.
    Url(String),
    /// A floating-point number.
    Number(f64),
    /// A whole number.
    Integer(i64),
    /// A boolean flag.
    Boolean(bool),
    /// A UTC datetime.
    DateTime(DateTime<Utc>),
    /// A calendar date.
    Date(NaiveDate),
}

impl ScalarValue {
    /// The kind of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Text(_) => ScalarKind::Text,
            Self::Url(_) => ScalarKind::Url,
            Self::Number(_) => ScalarKind::Number,
            Self::Integer(_) => ScalarKind::Integer,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::DateTime(_) => ScalarKind::DateTime,
            Self::Date(_) => ScalarKind::Date,
        }
    }

    /// Parse a datetime scalar from an RFC 3339 string, rejecting non-UTC
    /// offsets. Only the `Z` suffix is accepted.
    pub fn parse_date_time(input: &str) -> Result<Self, CoreError> {
        if !input.ends_with('Z') {
            return Err(CoreError::InvalidDateTime {
                input: input.to_string(),
                reason: "must use Z suffix (UTC only)".to_string(),
            });
        }
        let parsed = DateTime::parse_from_rfc3339(input).map_err(|e| {
            CoreError::InvalidDateTime {
                input: input.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::DateTime(parsed.with_timezone(&Utc)))
    }

    /// Parse a date scalar from a `YYYY-MM-DD` string.
    pub fn parse_date(input: &str) -> Result<Self, CoreError> {
        let parsed = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
            CoreError::InvalidDate {
                input: input.to_string(),
            }
        })?;
        Ok(Self::Date(parsed))
    }

    /// Whether the value counts as empty for required-property checks.
    ///
    /// Only text-like scalars can be empty; numbers, booleans, and temporal
    /// values are always considered set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Url(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the scalar as a JSON primitive.
    ///
    /// Datetimes render as `YYYY-MM-DDTHH:MM:SSZ`; dates as `YYYY-MM-DD`.
    /// A non-finite `Number` has no JSON representation and renders as null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(s) | Self::Url(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Integer(i) => serde_json::Value::Number((*i).into()),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::DateTime(dt) => serde_json::Value::String(
                dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            Self::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_kind_matching() {
        assert!(ScalarKind::Text.admits(&ScalarValue::Text("x".into())));
        assert!(ScalarKind::Url.admits(&ScalarValue::Url("https://e.com".into())));
        assert!(!ScalarKind::Text.admits(&ScalarValue::Url("https://e.com".into())));
        assert!(!ScalarKind::Boolean.admits(&ScalarValue::Integer(1)));
    }

    #[test]
    fn test_number_admits_integer_but_not_reverse() {
        assert!(ScalarKind::Number.admits(&ScalarValue::Integer(3)));
        assert!(ScalarKind::Number.admits(&ScalarValue::Number(3.5)));
        assert!(!ScalarKind::Integer.admits(&ScalarValue::Number(3.0)));
    }

    #[test]
    fn test_datetime_requires_z_suffix() {
        assert!(ScalarValue::parse_date_time("2024-05-01T12:00:00Z").is_ok());
        assert!(ScalarValue::parse_date_time("2024-05-01T12:00:00+00:00").is_err());
        assert!(ScalarValue::parse_date_time("2024-05-01T12:00:00+05:30").is_err());
        assert!(ScalarValue::parse_date_time("not-a-datetime-Z").is_err());
    }

    #[test]
    fn test_datetime_renders_with_z() {
        let v = ScalarValue::parse_date_time("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(v.to_json(), serde_json::json!("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn test_date_parse_and_render() {
        let v = ScalarValue::parse_date("2024-05-01").unwrap();
        assert_eq!(v.to_json(), serde_json::json!("2024-05-01"));
        assert!(ScalarValue::parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_emptiness() {
        assert!(ScalarValue::Text("  ".into()).is_empty());
        assert!(ScalarValue::Url(String::new()).is_empty());
        assert!(!ScalarValue::Integer(0).is_empty());
        assert!(!ScalarValue::Boolean(false).is_empty());
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!(ScalarKind::from_keyword("URL"), Some(ScalarKind::Url));
        assert_eq!(ScalarKind::from_keyword("DateTime"), Some(ScalarKind::DateTime));
        assert_eq!(ScalarKind::from_keyword("ImageObject"), None);
    }

    #[test]
    fn test_non_finite_number_renders_null() {
        assert_eq!(ScalarValue::Number(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
