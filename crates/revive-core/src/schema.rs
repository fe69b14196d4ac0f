//! # Schema Model
//!
//! A schema describes how to rebuild a typed instance (or a sequence of
//! them) from a JSON value. There are exactly three shapes:
//!
//! - `Constructor`: a bare type reference. Shorthand for an object schema
//!   of that type with no nested property schemas.
//! - `Object`: a type reference plus a map from property name to the schema
//!   applied to that property's value. Properties not in the map are plain
//!   fields and receive the raw JSON value.
//! - `Array`: an item schema applied to every element of a JSON array.
//!
//! Schemas are immutable values built by the caller. They own their
//! children, so a schema tree is always finite; recursive types describe
//! themselves through `HasSchema`, which is consulted lazily one JSON level
//! at a time.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Revivable, TypeRef};

/// A schema value in any of its three accepted shapes.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Bare type reference: recurse with no nested property schemas.
    Constructor(TypeRef),
    /// Type reference plus nested property schemas.
    Object(ObjectSchema),
    /// Item schema applied to every array element.
    Array(ArraySchema),
}

/// Canonical form of a schema after the constructor shorthand is removed.
#[derive(Debug, Clone)]
pub enum ResolvedSchema<'a> {
    /// An object schema, borrowed when the input already was one.
    Object(Cow<'a, ObjectSchema>),
    /// An array schema.
    Array(&'a ArraySchema),
}

/// Schema for a JSON object revived into an instance of `type_ref`.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    type_ref: TypeRef,
    properties: BTreeMap<String, Schema>,
}

/// Schema for a JSON array whose elements are revived with `items`.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    items: Box<Schema>,
}

impl Schema {
    /// Constructor shorthand for a compiled type.
    pub fn of<T: Revivable>() -> Self {
        Self::Constructor(TypeRef::of::<T>())
    }

    /// Array schema with the given item schema.
    pub fn array(items: impl Into<Schema>) -> Self {
        Self::Array(ArraySchema::new(items))
    }

    /// Normalize to the two-variant canonical form.
    ///
    /// A bare constructor becomes an `ObjectSchema` with an empty property
    /// map; object and array schemas pass through unchanged.
    pub fn resolve(&self) -> ResolvedSchema<'_> {
        match self {
            Self::Constructor(type_ref) => {
                ResolvedSchema::Object(Cow::Owned(ObjectSchema::new(type_ref.clone())))
            }
            Self::Object(object) => ResolvedSchema::Object(Cow::Borrowed(object)),
            Self::Array(array) => ResolvedSchema::Array(array),
        }
    }

    /// The type an object-shaped schema constructs, or `None` for arrays.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Constructor(type_ref) => Some(type_ref),
            Self::Object(object) => Some(object.type_ref()),
            Self::Array(_) => None,
        }
    }

    /// Whether this schema is an array schema.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl ObjectSchema {
    /// Object schema for `type_ref` with no nested property schemas.
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            properties: BTreeMap::new(),
        }
    }

    /// Object schema for a compiled type.
    pub fn of<T: Revivable>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    /// Add (or replace) the nested schema for one property.
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.properties.insert(name.into(), schema.into());
        self
    }

    /// The type this schema constructs.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Nested property schemas, keyed by property name.
    pub fn properties(&self) -> &BTreeMap<String, Schema> {
        &self.properties
    }

    /// Nested schema for one property, if declared.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.properties.get(name)
    }
}

impl ArraySchema {
    /// Array schema applying `items` to every element.
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            items: Box::new(items.into()),
        }
    }

    /// The schema applied to each element.
    pub fn items(&self) -> &Schema {
        &self.items
    }
}

impl From<TypeRef> for Schema {
    fn from(type_ref: TypeRef) -> Self {
        Self::Constructor(type_ref)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Self::Object(object)
    }
}

impl From<ArraySchema> for Schema {
    fn from(array: ArraySchema) -> Self {
        Self::Array(array)
    }
}

/// Compact description: `Employee { friends: [Employee], job: Job }`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor(type_ref) => f.write_str(type_ref.name()),
            Self::Object(object) => fmt::Display::fmt(object, f),
            Self::Array(array) => write!(f, "[{}]", array.items()),
        }
    }
}

impl fmt::Display for ObjectSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_ref.name())?;
        if self.properties.is_empty() {
            return Ok(());
        }
        f.write_str(" { ")?;
        for (i, (name, schema)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {schema}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;
    use crate::types::FieldTable;

    #[derive(Debug, Default)]
    struct Job {
        title: String,
    }

    impl Revivable for Job {
        const TYPE_NAME: &'static str = "Job";

        fn construct() -> Result<Self, ConstructionError> {
            Ok(Self::default())
        }

        fn fields() -> FieldTable<Self> {
            FieldTable::new().value("title", |job: &mut Job, title: String| job.title = title)
        }
    }

    #[test]
    fn test_constructor_resolves_to_empty_object_schema() {
        let schema = Schema::of::<Job>();
        match schema.resolve() {
            ResolvedSchema::Object(object) => {
                assert_eq!(object.type_ref().name(), "Job");
                assert!(object.properties().is_empty());
                assert!(matches!(object, Cow::Owned(_)));
            }
            ResolvedSchema::Array(_) => panic!("constructor must resolve to an object schema"),
        }
    }

    #[test]
    fn test_object_schema_passes_through_borrowed() {
        let schema: Schema = ObjectSchema::of::<Job>()
            .property("title", Schema::of::<Job>())
            .into();
        match schema.resolve() {
            ResolvedSchema::Object(object) => {
                assert!(matches!(object, Cow::Borrowed(_)));
                assert_eq!(object.properties().len(), 1);
            }
            ResolvedSchema::Array(_) => panic!("object schema must stay an object schema"),
        }
    }

    #[test]
    fn test_array_schema_passes_through() {
        let schema = Schema::array(Schema::of::<Job>());
        assert!(schema.is_array());
        assert!(schema.type_ref().is_none());
        match schema.resolve() {
            ResolvedSchema::Array(array) => {
                assert_eq!(array.items().type_ref().map(TypeRef::name), Some("Job"));
            }
            ResolvedSchema::Object(_) => panic!("array schema must stay an array schema"),
        }
    }

    #[test]
    fn test_property_replaces_existing_entry() {
        let schema = ObjectSchema::of::<Job>()
            .property("x", Schema::of::<Job>())
            .property("x", Schema::array(Schema::of::<Job>()));
        assert!(schema.get("x").map(Schema::is_array).unwrap_or(false));
    }

    #[test]
    fn test_display() {
        let schema: Schema = ObjectSchema::of::<Job>()
            .property("b", Schema::array(Schema::of::<Job>()))
            .property("a", Schema::of::<Job>())
            .into();
        assert_eq!(schema.to_string(), "Job { a: Job, b: [Job] }");
        assert_eq!(Schema::of::<Job>().to_string(), "Job");
    }
}
