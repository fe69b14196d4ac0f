//! # Type Model — Revivable Types, Field Tables, Type References
//!
//! The reviver never inspects a type's layout. Everything it needs comes
//! from three explicit seams:
//!
//! - [`Revivable`]: implemented by a compiled type. Supplies a bare
//!   instance (`construct`), a [`FieldTable`] of named setters, and
//!   optionally the [`HasSchema`] capability and a post-revival hook.
//! - [`Constructible`]: a type-erased factory for bare instances. Every
//!   `Revivable` type gets one through [`TypeRef::of`]; runtime-declared
//!   types implement it directly.
//! - [`Instance`]: the object-safe view of a bare instance that the
//!   reviver populates field by field.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AssignError, ConstructionError};
use crate::revived::Revived;
use crate::schema::Schema;

/// A compiled type that can be rebuilt from JSON.
///
/// # Example
///
/// ```
/// use revive_core::{ConstructionError, FieldTable, Revivable};
///
/// #[derive(Debug, Default)]
/// struct Job {
///     title: String,
/// }
///
/// impl Revivable for Job {
///     const TYPE_NAME: &'static str = "Job";
///
///     fn construct() -> Result<Self, ConstructionError> {
///         Ok(Self::default())
///     }
///
///     fn fields() -> FieldTable<Self> {
///         FieldTable::new().value("title", |job: &mut Job, title: String| job.title = title)
///     }
/// }
/// ```
pub trait Revivable: Any + Sized {
    /// Name used in schema descriptions and error messages.
    const TYPE_NAME: &'static str;

    /// Produce a bare instance; every field at its default.
    fn construct() -> Result<Self, ConstructionError>;

    /// Named setters for every field JSON may populate.
    fn fields() -> FieldTable<Self>;

    /// Capability query: return `Some(self)` if the type implements
    /// [`HasSchema`].
    fn as_has_schema(&self) -> Option<&dyn HasSchema> {
        None
    }

    /// Called once after all fields are assigned. Skipped in assign-only
    /// mode.
    fn revived(&mut self) -> Result<(), ConstructionError> {
        Ok(())
    }
}

/// Self-describing schema capability.
///
/// A type implementing this reports the nested property schemas its own
/// fields need, so call sites can pass the bare type. Entries the caller
/// supplies explicitly take precedence, property by property.
pub trait HasSchema {
    /// The schema describing instances of this type. Must be an object
    /// schema (or constructor shorthand) for the implementing type.
    fn revive_schema(&self) -> Schema;
}

type Setter<T> = Box<dyn Fn(&mut T, Revived) -> Result<(), AssignError>>;

/// Registry of named field setters for `T`.
///
/// Each helper converts the incoming [`Revived`] value into a concrete
/// field type before handing it to the caller's closure:
///
/// | Helper     | Accepts                                  |
/// |------------|------------------------------------------|
/// | `value`    | plain JSON, deserialized with serde      |
/// | `instance` | a revived instance of `V`                |
/// | `optional` | a revived instance of `V`, or `null`     |
/// | `list`     | a revived array of `V` instances         |
/// | `with`     | the raw `Revived` value                  |
pub struct FieldTable<T> {
    setters: BTreeMap<&'static str, Setter<T>>,
}

impl<T: 'static> FieldTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            setters: BTreeMap::new(),
        }
    }

    /// Register a setter that receives the raw revived value.
    pub fn with<F>(mut self, name: &'static str, setter: F) -> Self
    where
        F: Fn(&mut T, Revived) -> Result<(), AssignError> + 'static,
    {
        self.setters.insert(name, Box::new(setter));
        self
    }

    /// Register a plain field, deserialized from the raw JSON value.
    pub fn value<V, F>(self, name: &'static str, set: F) -> Self
    where
        V: DeserializeOwned,
        F: Fn(&mut T, V) + 'static,
    {
        self.with(name, move |target, revived| {
            set(target, revived.into_value()?);
            Ok(())
        })
    }

    /// Register a field holding a revived instance of `V`.
    pub fn instance<V, F>(self, name: &'static str, set: F) -> Self
    where
        V: Revivable,
        F: Fn(&mut T, V) + 'static,
    {
        self.with(name, move |target, revived| {
            set(target, revived.into_instance()?);
            Ok(())
        })
    }

    /// Register a nullable field holding a revived instance of `V`.
    pub fn optional<V, F>(self, name: &'static str, set: F) -> Self
    where
        V: Revivable,
        F: Fn(&mut T, Option<V>) + 'static,
    {
        self.with(name, move |target, revived| {
            set(target, revived.into_optional()?);
            Ok(())
        })
    }

    /// Register a field holding a sequence of revived `V` instances.
    pub fn list<V, F>(self, name: &'static str, set: F) -> Self
    where
        V: Revivable,
        F: Fn(&mut T, Vec<V>) + 'static,
    {
        self.with(name, move |target, revived| {
            set(target, revived.into_list()?);
            Ok(())
        })
    }

    /// Whether a setter is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// Registered field names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.setters.keys().copied()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    /// Whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }

    /// Run the setter registered under `name`.
    pub fn assign(&self, target: &mut T, name: &str, value: Revived) -> Result<(), AssignError> {
        match self.setters.get(name) {
            Some(setter) => setter(target, value),
            None => Err(AssignError::NoSuchField(name.to_owned())),
        }
    }
}

impl<T: 'static> Default for FieldTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.setters.keys()).finish()
    }
}

/// Factory for bare instances of one type.
pub trait Constructible: Send + Sync {
    /// Name used in schema descriptions and error messages.
    fn type_name(&self) -> &str;

    /// The Rust type this factory builds, when it is a compiled type.
    fn rust_type(&self) -> Option<TypeId> {
        None
    }

    /// Produce a bare instance.
    fn construct(&self) -> Result<Box<dyn Instance>, ConstructionError>;

    /// The factory itself, for downcasting in [`Constructible::same_type_as`].
    fn as_any(&self) -> &dyn Any;

    /// Whether `other` builds the same type as this factory. Only consulted
    /// when neither side is a compiled type; compares names by default.
    fn same_type_as(&self, other: &dyn Constructible) -> bool {
        self.type_name() == other.type_name()
    }
}

/// A bare instance being populated by the reviver.
pub trait Instance {
    /// Name of the instance's type.
    fn type_name(&self) -> &str;

    /// Whether the instance has a field of this name.
    fn has_field(&self, name: &str) -> bool;

    /// Assign a revived value to the named field.
    fn assign(&mut self, name: &str, value: Revived) -> Result<(), AssignError>;

    /// Whether keys with no matching field can be stored as raw JSON.
    /// Compiled types cannot grow fields, so they skip such keys instead.
    fn accepts_extra_keys(&self) -> bool {
        false
    }

    /// Store the raw value of a key that has no matching field.
    fn assign_extra(&mut self, name: &str, _value: Value) -> Result<(), AssignError> {
        Err(AssignError::NoSuchField(name.to_owned()))
    }

    /// The self-reported schema, if the type has the `HasSchema` capability.
    fn self_schema(&self) -> Option<Schema>;

    /// Post-revival hook.
    fn finish(&mut self) -> Result<(), ConstructionError>;

    /// Release the populated value for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Cheap, cloneable reference to a constructible type.
#[derive(Clone)]
pub struct TypeRef(Arc<dyn Constructible>);

impl TypeRef {
    /// Reference to a compiled `Revivable` type.
    pub fn of<T: Revivable>() -> Self {
        Self(Arc::new(Compiled::<T>(PhantomData)))
    }

    /// Reference backed by a custom factory.
    pub fn new(factory: impl Constructible + 'static) -> Self {
        Self(Arc::new(factory))
    }

    /// Name of the referenced type.
    pub fn name(&self) -> &str {
        self.0.type_name()
    }

    /// Produce a bare instance of the referenced type.
    pub fn construct(&self) -> Result<Box<dyn Instance>, ConstructionError> {
        self.0.construct()
    }

    /// Whether two references denote the same type.
    ///
    /// Compiled types compare by `TypeId`; anything else defers to
    /// [`Constructible::same_type_as`].
    pub fn same_type(&self, other: &TypeRef) -> bool {
        match (self.0.rust_type(), other.0.rust_type()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.0.same_type_as(&*other.0),
            _ => false,
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name()).finish()
    }
}

struct Compiled<T>(PhantomData<fn() -> T>);

impl<T: Revivable> Constructible for Compiled<T> {
    fn type_name(&self) -> &str {
        T::TYPE_NAME
    }

    fn rust_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<T>())
    }

    fn construct(&self) -> Result<Box<dyn Instance>, ConstructionError> {
        Ok(Box::new(Constructed {
            value: T::construct()?,
            fields: T::fields(),
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A compiled instance paired with its field table.
struct Constructed<T> {
    value: T,
    fields: FieldTable<T>,
}

impl<T: Revivable> Instance for Constructed<T> {
    fn type_name(&self) -> &str {
        T::TYPE_NAME
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    fn assign(&mut self, name: &str, value: Revived) -> Result<(), AssignError> {
        self.fields.assign(&mut self.value, name, value)
    }

    fn self_schema(&self) -> Option<Schema> {
        self.value
            .as_has_schema()
            .map(|capability| capability.revive_schema())
    }

    fn finish(&mut self) -> Result<(), ConstructionError> {
        self.value.revived()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.value)
    }
}
