//! # Type Registry
//!
//! Resolves the type names of a schema document into [`TypeRef`]s backed by
//! record factories. The registry holds only declarations, never type
//! references, so types may refer to themselves without forming `Arc`
//! cycles: each factory carries a handle to the registry and resolves its
//! self-reported schema on demand.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use revive_core::{
    AssignError, ConstructionError, Constructible, Instance, ObjectSchema, Revived, Schema,
    TypeRef,
};
use serde_json::Value;

use crate::document::{SchemaDocumentError, SchemaSpec, TypeDef};
use crate::record::{Record, RecordValue};

/// Validated set of record type declarations.
#[derive(Clone)]
pub struct TypeRegistry {
    types: Arc<BTreeMap<String, Arc<TypeDef>>>,
}

impl TypeRegistry {
    /// Build a registry, validating every declaration.
    ///
    /// # Errors
    ///
    /// `DuplicateField` for repeated field names, `UndeclaredProperty` when a
    /// schema covers a property the type does not declare, and `UnknownType`
    /// when a schema names an undeclared type.
    pub fn new(types: BTreeMap<String, TypeDef>) -> Result<Self, SchemaDocumentError> {
        let registry = Self {
            types: Arc::new(
                types
                    .into_iter()
                    .map(|(name, def)| (name, Arc::new(def)))
                    .collect(),
            ),
        };
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<(), SchemaDocumentError> {
        for (name, def) in self.types.iter() {
            let mut seen = BTreeSet::new();
            if let Some(field) = def.fields.iter().find(|field| !seen.insert(field.as_str())) {
                return Err(SchemaDocumentError::DuplicateField {
                    type_name: name.clone(),
                    field: field.clone(),
                });
            }
            self.self_schema(name, def)?;
        }
        Ok(())
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Declared type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// The declaration of one type.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name).map(Arc::as_ref)
    }

    /// Reference to a declared type.
    pub fn type_ref(&self, name: &str) -> Result<TypeRef, SchemaDocumentError> {
        let def = self
            .types
            .get(name)
            .ok_or_else(|| SchemaDocumentError::UnknownType(name.to_owned()))?;
        Ok(TypeRef::new(RecordFactory {
            name: name.to_owned(),
            def: Arc::clone(def),
            registry: self.clone(),
        }))
    }

    /// Resolve a document schema spec into a [`Schema`].
    pub fn resolve(&self, spec: &SchemaSpec) -> Result<Schema, SchemaDocumentError> {
        match spec {
            SchemaSpec::Type(name) => Ok(Schema::Constructor(self.type_ref(name)?)),
            SchemaSpec::Object(object) => {
                self.resolve_object(&object.type_name, &object.properties)
            }
            SchemaSpec::Array(array) => Ok(Schema::array(self.resolve(&array.items)?)),
        }
    }

    fn resolve_object(
        &self,
        type_name: &str,
        properties: &BTreeMap<String, SchemaSpec>,
    ) -> Result<Schema, SchemaDocumentError> {
        let mut object = ObjectSchema::new(self.type_ref(type_name)?);
        for (property, nested) in properties {
            if !self.declares(type_name, property) {
                return Err(SchemaDocumentError::UndeclaredProperty {
                    type_name: type_name.to_owned(),
                    property: property.clone(),
                });
            }
            object = object.property(property.clone(), self.resolve(nested)?);
        }
        Ok(object.into())
    }

    /// The resolved schema a declared type reports for itself.
    pub fn reported_schema(&self, name: &str) -> Result<Option<Schema>, SchemaDocumentError> {
        let def = self
            .types
            .get(name)
            .ok_or_else(|| SchemaDocumentError::UnknownType(name.to_owned()))?;
        self.self_schema(name, def)
    }

    fn declares(&self, type_name: &str, field: &str) -> bool {
        self.types
            .get(type_name)
            .is_some_and(|def| def.fields.iter().any(|f| f == field))
    }

    /// The schema a record type reports for itself, if it declares one.
    fn self_schema(&self, name: &str, def: &TypeDef) -> Result<Option<Schema>, SchemaDocumentError> {
        match &def.schema {
            Some(properties) => self.resolve_object(name, properties).map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.types.keys()).finish()
    }
}

/// Builds bare [`Record`]s of one declared type.
struct RecordFactory {
    name: String,
    def: Arc<TypeDef>,
    registry: TypeRegistry,
}

impl Constructible for RecordFactory {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn construct(&self) -> Result<Box<dyn Instance>, ConstructionError> {
        Ok(Box::new(RecordInstance {
            record: Record::new(self.name.clone()),
            def: Arc::clone(&self.def),
            registry: self.registry.clone(),
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    // A like-named type from another registry is a different type.
    fn same_type_as(&self, other: &dyn Constructible) -> bool {
        other
            .as_any()
            .downcast_ref::<RecordFactory>()
            .is_some_and(|other| Arc::ptr_eq(&self.def, &other.def))
    }
}

/// A record being populated, with the declaration it is checked against.
struct RecordInstance {
    record: Record,
    def: Arc<TypeDef>,
    registry: TypeRegistry,
}

impl Instance for RecordInstance {
    fn type_name(&self) -> &str {
        self.record.type_name()
    }

    fn has_field(&self, name: &str) -> bool {
        self.def.fields.iter().any(|field| field == name)
    }

    fn assign(&mut self, name: &str, value: Revived) -> Result<(), AssignError> {
        if !self.has_field(name) {
            return Err(AssignError::NoSuchField(name.to_owned()));
        }
        self.record.set(name, RecordValue::try_from(value)?);
        Ok(())
    }

    fn accepts_extra_keys(&self) -> bool {
        true
    }

    fn assign_extra(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.record.set(name, RecordValue::Json(value));
        Ok(())
    }

    fn self_schema(&self) -> Option<Schema> {
        // Declarations were validated when the registry was built.
        match self.registry.self_schema(self.record.type_name(), &self.def) {
            Ok(schema) => schema,
            Err(err) => {
                tracing::warn!(
                    type_name = self.record.type_name(),
                    %err,
                    "ignoring unresolvable self-reported schema"
                );
                None
            }
        }
    }

    fn finish(&mut self) -> Result<(), ConstructionError> {
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.record)
    }
}
