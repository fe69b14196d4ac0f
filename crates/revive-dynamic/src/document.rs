//! # Schema Documents
//!
//! Schemas authored as data. A document declares record types and the root
//! schema to apply:
//!
//! ```yaml
//! types:
//!   Employee:
//!     fields: [name, job, friends]
//!     schema:                       # optional: self-reported schema
//!       job: { type: Job, properties: { props: JobProperties } }
//!       friends: { items: Employee }
//!   Job:
//!     fields: [title, props]
//!   JobProperties:
//!     fields: [prop1]
//! root: Employee
//! ```
//!
//! A schema spec is a type name (constructor shorthand), an object
//! `{ type, properties }`, or an array `{ items }`. YAML is a superset of
//! JSON, so documents may be written in either.

use std::collections::BTreeMap;
use std::path::Path;

use revive_core::{FieldPath, RevivalOptions, ReviveError, Schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::RecordValue;
use crate::registry::TypeRegistry;

/// Error while loading or compiling a schema document.
#[derive(Error, Debug)]
pub enum SchemaDocumentError {
    /// The document is not valid YAML/JSON or does not match the format.
    #[error("schema document parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A schema spec names a type the document does not declare.
    #[error("unknown type '{0}' referenced in schema document")]
    UnknownType(String),

    /// A type lists the same field twice.
    #[error("type '{type_name}' lists field '{field}' more than once")]
    DuplicateField {
        /// Declaring type.
        type_name: String,
        /// Repeated field.
        field: String,
    },

    /// A type's schema (or an object spec) covers a property that is not
    /// one of the type's fields.
    #[error("type '{type_name}' has no field '{property}' to attach a schema to")]
    UndeclaredProperty {
        /// Target type.
        type_name: String,
        /// Property named by the schema.
        property: String,
    },

    /// IO error reading the document.
    #[error("io error reading schema document: {0}")]
    Io(#[from] std::io::Error),
}

/// A schema document as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Declared record types by name.
    #[serde(default)]
    pub types: BTreeMap<String, TypeDef>,
    /// Schema applied to the document root.
    pub root: SchemaSpec,
}

/// Declaration of one record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    /// Field names instances of this type accept.
    pub fields: Vec<String>,
    /// Self-reported property schemas, consulted when the type is used bare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<BTreeMap<String, SchemaSpec>>,
}

/// One schema in document form.
///
/// Object and array specs reject keys they do not know, so a misspelled
/// `properties` or a spec mixing `type` with `items` fails to parse instead
/// of silently losing its nested schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSpec {
    /// Bare type name.
    Type(String),
    /// Type plus nested property schemas.
    Object(ObjectSpec),
    /// Item schema for arrays.
    Array(ArraySpec),
}

/// `{ type, properties }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    /// Target type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Nested property schemas.
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaSpec>,
}

/// `{ items }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
    /// Schema applied to every element.
    pub items: Box<SchemaSpec>,
}

/// A document whose type names have all been resolved.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    registry: TypeRegistry,
    root: Schema,
}

impl SchemaDocument {
    /// Parse a document from YAML or JSON text.
    pub fn parse(text: &str) -> Result<Self, SchemaDocumentError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, SchemaDocumentError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Validate the declared types and resolve the root schema.
    pub fn compile(self) -> Result<CompiledDocument, SchemaDocumentError> {
        let registry = TypeRegistry::new(self.types)?;
        let root = registry.resolve(&self.root)?;
        tracing::debug!(types = registry.len(), root = %root, "compiled schema document");
        Ok(CompiledDocument { registry, root })
    }
}

impl CompiledDocument {
    /// The resolved root schema.
    pub fn root(&self) -> &Schema {
        &self.root
    }

    /// The registry of declared types.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Revive a JSON document against the root schema.
    ///
    /// # Errors
    ///
    /// Any [`ReviveError`] raised by the reviver.
    pub fn revive(&self, json: &str, options: &RevivalOptions) -> Result<RecordValue, ReviveError> {
        let revived = revive_engine::unmarshal_value(json, &self.root, options)?;
        let found = revived.kind();
        RecordValue::try_from(revived).map_err(|_| ReviveError::TypeMismatch {
            path: FieldPath::root(),
            expected: "record".to_owned(),
            found,
        })
    }
}
