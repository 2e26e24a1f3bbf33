//! # Entity Instances — Per-Render Value Graphs
//!
//! An `EntityInstance` is a transient assembly of property values for one
//! vocabulary type, created by a content-source adapter for a single render
//! and dropped afterwards. Instances carry no persisted identity.
//!
//! ## Graph Shape
//!
//! Nested instances are held behind [`InstanceHandle`]
//! (`Rc<RefCell<EntityInstance>>`) so adapters can share one instance
//! between several parents and can close cycles (a place containing the
//! place that contains it). The serializer guards against those cycles by
//! handle identity; this module only provides the shape.
//!
//! Property order is insertion order; the serializer re-orders by the
//! composed declaration table, so adapters need not care.

use std::cell::RefCell;
use std::rc::Rc;

use crate::identity::{PropertyName, TypeName};
use crate::scalar::ScalarValue;

/// Shared handle to an instance in a per-render graph.
pub type InstanceHandle = Rc<RefCell<EntityInstance>>;

/// A value supplied for one property: a scalar, a nested instance, or a
/// sequence of either.
#[derive(Debug, Clone)]
pub enum Value {
    /// A single scalar.
    Scalar(ScalarValue),
    /// A nested entity instance.
    Entity(InstanceHandle),
    /// An ordered sequence of values.
    List(Vec<Value>),
}

impl Value {
    /// A text scalar.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(ScalarValue::Text(s.into()))
    }

    /// A URL scalar.
    pub fn url(s: impl Into<String>) -> Self {
        Self::Scalar(ScalarValue::Url(s.into()))
    }

    /// A number scalar.
    pub fn number(n: f64) -> Self {
        Self::Scalar(ScalarValue::Number(n))
    }

    /// An integer scalar.
    pub fn integer(i: i64) -> Self {
        Self::Scalar(ScalarValue::Integer(i))
    }

    /// A boolean scalar.
    pub fn boolean(b: bool) -> Self {
        Self::Scalar(ScalarValue::Boolean(b))
    }

    /// A nested instance.
    pub fn entity(handle: InstanceHandle) -> Self {
        Self::Entity(handle)
    }

    /// A sequence of values.
    pub fn list(values: Vec<Value>) -> Self {
        Self::List(values)
    }

    /// Whether the value counts as empty for required-property checks:
    /// an empty text/URL, an empty sequence, or a sequence whose elements
    /// are all empty. Nested instances are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::Entity(_) => false,
            Self::List(items) => items.iter().all(Value::is_empty),
        }
    }
}

/// An entity instance: a type name plus its present property values.
///
/// Absent properties are simply unset — there is no null value.
#[derive(Debug, Clone)]
pub struct EntityInstance {
    type_name: TypeName,
    values: Vec<(PropertyName, Value)>,
}

impl EntityInstance {
    /// Create an empty instance of the given type.
    pub fn new(type_name: TypeName) -> Self {
        Self {
            type_name,
            values: Vec::new(),
        }
    }

    /// Wrap the instance in a shared handle for graph assembly.
    pub fn into_handle(self) -> InstanceHandle {
        Rc::new(RefCell::new(self))
    }

    /// The instance's vocabulary type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Set a property value, replacing any previous value for the name
    /// (the original position is kept).
    pub fn set(&mut self, name: PropertyName, value: Value) {
        if let Some(slot) = self.values.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    /// Look up a present property value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Iterate present properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&PropertyName, &Value)> {
        self.values.iter().map(|(n, v)| (n, v))
    }

    /// Number of present properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
