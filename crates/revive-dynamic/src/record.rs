//! # Records — Instances of Runtime-Declared Types
//!
//! A [`Record`] is what the reviver builds for a type declared in a schema
//! document. It keeps only the fields its type declares; every value is
//! either raw JSON, a nested record, or a list of record values.

use std::collections::BTreeMap;

use revive_core::{AssignError, Revived};
use serde_json::{Map, Value};

/// Key under which [`Record::to_json`] writes the record's type name.
pub const TYPE_KEY: &str = "$type";

/// A populated instance of a runtime-declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: BTreeMap<String, RecordValue>,
}

/// One field value of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A plain JSON value.
    Json(Value),
    /// A nested record.
    Record(Record),
    /// A revived array, in input order.
    List(Vec<RecordValue>),
}

impl Record {
    /// An empty record of the named type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Name of the record's type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value of one field, if it was present in the document.
    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.fields.get(name)
    }

    /// All populated fields, sorted by name.
    pub fn fields(&self) -> &BTreeMap<String, RecordValue> {
        &self.fields
    }

    /// Set one field.
    pub fn set(&mut self, name: impl Into<String>, value: RecordValue) {
        self.fields.insert(name.into(), value);
    }

    /// Render as JSON, tagging every record with its type under `"$type"`.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(TYPE_KEY.to_owned(), Value::String(self.type_name.clone()));
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        Value::Object(object)
    }
}

impl RecordValue {
    /// The plain JSON value, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The nested record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[RecordValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The plain JSON string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Record(record) => record.to_json(),
            Self::List(items) => Value::Array(items.iter().map(RecordValue::to_json).collect()),
        }
    }
}

impl TryFrom<Revived> for RecordValue {
    type Error = AssignError;

    fn try_from(revived: Revived) -> Result<Self, Self::Error> {
        match revived {
            Revived::Value(value) => Ok(Self::Json(value)),
            Revived::Instance(instance) => {
                let found = instance.type_name().to_owned();
                instance
                    .into_any()
                    .downcast::<Record>()
                    .map(|record| Self::Record(*record))
                    .map_err(|_| AssignError::shape("record", found))
            }
            Revived::Array(items) => items
                .into_iter()
                .map(RecordValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
        }
    }
}
