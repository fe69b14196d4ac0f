//! # Revived Values
//!
//! The result of applying a schema to a JSON value. Field setters receive a
//! `Revived` and convert it into their concrete field type with one of the
//! `into_*` methods.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AssignError;
use crate::types::{Instance, Revivable};

/// A value produced by the reviver.
pub enum Revived {
    /// Raw JSON: a plain field with no schema, or `null` where a nested
    /// schema was declared.
    Value(Value),
    /// A constructed and populated instance.
    Instance(Box<dyn Instance>),
    /// An array revived element by element, in input order.
    Array(Vec<Revived>),
}

/// Short name of a JSON value's kind, as used in mismatch errors.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Revived {
    /// Describe what this value holds: a JSON kind or an instance type name.
    pub fn kind(&self) -> String {
        match self {
            Self::Value(value) => json_kind(value).to_owned(),
            Self::Instance(instance) => instance.type_name().to_owned(),
            Self::Array(items) => format!("array of {} revived elements", items.len()),
        }
    }

    /// Whether this is a JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Deserialize a plain value into `V`.
    pub fn into_value<V: DeserializeOwned>(self) -> Result<V, AssignError> {
        match self {
            Self::Value(value) => Ok(serde_json::from_value(value)?),
            other => Err(AssignError::shape("plain value", other.kind())),
        }
    }

    /// Take the raw JSON value.
    pub fn into_json(self) -> Result<Value, AssignError> {
        match self {
            Self::Value(value) => Ok(value),
            other => Err(AssignError::shape("plain value", other.kind())),
        }
    }

    /// Take the type-erased instance.
    pub fn into_boxed_instance(self) -> Result<Box<dyn Instance>, AssignError> {
        match self {
            Self::Instance(instance) => Ok(instance),
            other => Err(AssignError::shape("object", other.kind())),
        }
    }

    /// Downcast to a revived instance of `V`.
    pub fn into_instance<V: Revivable>(self) -> Result<V, AssignError> {
        match self {
            Self::Instance(instance) => {
                let found = instance.type_name().to_owned();
                instance
                    .into_any()
                    .downcast::<V>()
                    .map(|boxed| *boxed)
                    .map_err(|_| AssignError::shape(V::TYPE_NAME, found))
            }
            other => Err(AssignError::shape(V::TYPE_NAME, other.kind())),
        }
    }

    /// Like [`Revived::into_instance`], but `null` becomes `None`.
    pub fn into_optional<V: Revivable>(self) -> Result<Option<V>, AssignError> {
        if self.is_null() {
            return Ok(None);
        }
        self.into_instance().map(Some)
    }

    /// Take the elements of a revived array.
    pub fn into_array(self) -> Result<Vec<Revived>, AssignError> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(AssignError::shape("array of revived instances", other.kind())),
        }
    }

    /// Downcast every element of a revived array to `V`, preserving order.
    pub fn into_list<V: Revivable>(self) -> Result<Vec<V>, AssignError> {
        self.into_array()?
            .into_iter()
            .map(Revived::into_instance::<V>)
            .collect()
    }
}

impl From<Value> for Revived {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Revived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Instance(instance) => f
                .debug_tuple("Instance")
                .field(&instance.type_name())
                .finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
        }
    }
}
