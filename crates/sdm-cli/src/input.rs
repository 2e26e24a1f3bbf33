//! Instance document adapter.
//!
//! Reads plain-JSON instance documents of the form:
//!
//! ```json
//! {
//!   "type": "CampingPitch",
//!   "values": {
//!     "name": "Pitch 12",
//!     "petsAllowed": true,
//!     "image": { "type": "ImageObject", "values": { "contentUrl": "…" } }
//!   }
//! }
//! ```
//!
//! JSON primitives carry less type information than scalars do, so the
//! adapter coerces them against the target property's contract: a string
//! becomes a URL, datetime, or date when the contract asks for one and the
//! text parses as such, otherwise text; a number becomes an integer when it
//! is whole and an `Integer` alternative exists. Properties the type does
//! not declare coerce contract-free, so the validator can report them
//! instead of the adapter rejecting the document.

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use serde_json::Value as Json;

use sdm_core::{
    EntityInstance, InstanceHandle, PropertyName, ScalarKind, ScalarValue, TypeName, Value,
};
use sdm_vocab::{AlternativeKind, PropertyContract, VocabularyRegistry};

#[derive(Debug, Deserialize)]
struct RawDocument {
    r#type: String,
    #[serde(default)]
    values: serde_json::Map<String, Json>,
}

/// Parse an instance document against a registry.
pub fn parse_document(registry: &VocabularyRegistry, json: &Json) -> anyhow::Result<InstanceHandle> {
    let raw: RawDocument = serde_json::from_value(json.clone())
        .context("instance documents need a \"type\" and a \"values\" object")?;
    build_instance(registry, &raw)
}

fn build_instance(
    registry: &VocabularyRegistry,
    raw: &RawDocument,
) -> anyhow::Result<InstanceHandle> {
    let type_name = TypeName::new(raw.r#type.clone())?;
    let table = registry
        .composed_properties(type_name.as_str())
        .with_context(|| format!("unknown instance type '{}'", type_name))?;

    let mut instance = EntityInstance::new(type_name);
    for (name, json) in &raw.values {
        let property = PropertyName::new(name.clone())?;
        let contract = table.get(name).map(|c| c.as_ref());
        let value = coerce_value(registry, contract, json)
            .with_context(|| format!("property '{name}'"))?;
        instance.set(property, value);
    }
    Ok(instance.into_handle())
}

fn coerce_value(
    registry: &VocabularyRegistry,
    contract: Option<&PropertyContract>,
    json: &Json,
) -> anyhow::Result<Value> {
    match json {
        Json::Object(_) => {
            let raw: RawDocument = serde_json::from_value(json.clone())
                .context("nested objects need a \"type\" and a \"values\" object")?;
            Ok(Value::entity(build_instance(registry, &raw)?))
        }
        Json::Array(items) => {
            let kinds = scalar_kinds(contract, true);
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let value = match item {
                    Json::Object(_) | Json::Array(_) => coerce_value(registry, contract, item)?,
                    _ => Value::Scalar(coerce_scalar(&kinds, item)?),
                };
                values.push(value);
            }
            Ok(Value::list(values))
        }
        _ => Ok(Value::Scalar(coerce_scalar(
            &scalar_kinds(contract, false),
            json,
        )?)),
    }
}

/// The scalar kinds a contract offers, in declaration order, filtered by
/// whether we are coercing a sequence element.
fn scalar_kinds(contract: Option<&PropertyContract>, repeated: bool) -> Vec<ScalarKind> {
    let Some(contract) = contract else {
        return Vec::new();
    };
    contract
        .alternatives()
        .iter()
        .filter(|alt| alt.repeated == repeated)
        .filter_map(|alt| match alt.kind {
            AlternativeKind::Scalar(kind) => Some(kind),
            AlternativeKind::Reference(_) => None,
        })
        .collect()
}

fn coerce_scalar(kinds: &[ScalarKind], json: &Json) -> anyhow::Result<ScalarValue> {
    match json {
        Json::String(s) => {
            for kind in kinds {
                match kind {
                    ScalarKind::Url => return Ok(ScalarValue::Url(s.clone())),
                    ScalarKind::DateTime => {
                        if let Ok(parsed) = ScalarValue::parse_date_time(s) {
                            return Ok(parsed);
                        }
                    }
                    ScalarKind::Date => {
                        if let Ok(parsed) = ScalarValue::parse_date(s) {
                            return Ok(parsed);
                        }
                    }
                    ScalarKind::Text => return Ok(ScalarValue::Text(s.clone())),
                    _ => {}
                }
            }
            Ok(ScalarValue::Text(s.clone()))
        }
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                if kinds.contains(&ScalarKind::Integer) || !kinds.contains(&ScalarKind::Number) {
                    return Ok(ScalarValue::Integer(i));
                }
            }
            n.as_f64()
                .map(ScalarValue::Number)
                .ok_or_else(|| anyhow!("number {n} has no 64-bit representation"))
        }
        Json::Bool(b) => Ok(ScalarValue::Boolean(*b)),
        Json::Null => bail!("null is not a value; omit the property instead"),
        Json::Object(_) | Json::Array(_) => unreachable!("handled by caller"),
    }
}
