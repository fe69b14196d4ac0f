//! # Reviver — Recursive Schema Application
//!
//! Walks a parsed JSON tree against a schema and produces a [`Revived`]
//! graph. For every object key the reviver decides between three outcomes:
//!
//! 1. the key has a nested schema (explicit, or reported by the type through
//!    `HasSchema`): recurse, then hand the result to the field's setter;
//! 2. the key has no nested schema: hand the raw JSON value to the setter;
//! 3. the type has no field of that name: fail with `UnknownField` when the
//!    caller asked for strictness; otherwise store the raw value if the
//!    instance accepts extra keys (records do), or skip it.
//!
//! ## Precedence
//!
//! Explicit property schemas always win. A type's self-reported schema only
//! fills properties the caller left out, so passing the bare type is enough
//! for types that describe themselves.
//!
//! ## Termination
//!
//! Each recursive call consumes one level of the JSON tree. Schema values
//! are finite owned trees, and self-reported schemas are fetched from a
//! fresh instance at each level, so a type may name itself (e.g. a list of
//! friends of the same type) without looping.

use revive_core::{
    json_kind, ArraySchema, FieldPath, Instance, ObjectSchema, ResolvedSchema, RevivalOptions,
    ReviveError, Revived, Schema, TypeRef,
};
use serde_json::{Map, Value};

/// Applies schemas to parsed JSON under one set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reviver {
    options: RevivalOptions,
}

impl Reviver {
    /// A reviver with the given options.
    pub fn new(options: RevivalOptions) -> Self {
        Self { options }
    }

    /// The options this reviver applies.
    pub fn options(&self) -> &RevivalOptions {
        &self.options
    }

    /// Revive `value` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first structural failure found; no partial result is
    /// produced.
    pub fn revive(&self, value: Value, schema: &Schema) -> Result<Revived, ReviveError> {
        self.revive_at(value, schema, &FieldPath::root())
    }

    fn revive_at(
        &self,
        value: Value,
        schema: &Schema,
        path: &FieldPath,
    ) -> Result<Revived, ReviveError> {
        match schema.resolve() {
            ResolvedSchema::Array(array) => self.revive_array(value, array, path),
            ResolvedSchema::Object(object) => self.revive_object(value, &object, path),
        }
    }

    fn revive_array(
        &self,
        value: Value,
        schema: &ArraySchema,
        path: &FieldPath,
    ) -> Result<Revived, ReviveError> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(ReviveError::TypeMismatch {
                    path: path.clone(),
                    expected: "array".to_owned(),
                    found: json_kind(&other).to_owned(),
                })
            }
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| self.revive_at(element, schema.items(), &path.join_index(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Revived::Array)
    }

    fn revive_object(
        &self,
        value: Value,
        schema: &ObjectSchema,
        path: &FieldPath,
    ) -> Result<Revived, ReviveError> {
        let type_ref = schema.type_ref();
        let type_name = type_ref.name();

        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(ReviveError::TypeMismatch {
                    path: path.clone(),
                    expected: format!("{type_name} object"),
                    found: json_kind(&other).to_owned(),
                })
            }
        };

        let mut instance =
            type_ref
                .construct()
                .map_err(|source| ReviveError::Construction {
                    path: path.clone(),
                    type_name: type_name.to_owned(),
                    source,
                })?;

        let reported = if self.options.assign_only {
            None
        } else {
            reported_schema(&*instance, type_ref, path)?
        };
        let declared = DeclaredProperties {
            explicit: schema,
            reported: reported.as_ref(),
        };
        declared.check_fields(&*instance, path)?;

        let missing = if self.options.fail_on_missing_fields {
            declared.missing(&entries)
        } else {
            Vec::new()
        };

        for (key, json) in entries {
            if !instance.has_field(&key) {
                if self.options.fail_on_unknown_fields {
                    return Err(ReviveError::UnknownField {
                        path: path.clone(),
                        type_name: type_name.to_owned(),
                        field: key,
                    });
                }
                if instance.accepts_extra_keys() {
                    tracing::trace!(%path, type_name, field = %key, "keeping key with no matching field");
                    instance
                        .assign_extra(&key, json)
                        .map_err(|err| err.at(path, type_name, &key))?;
                } else {
                    tracing::debug!(%path, type_name, field = %key, "skipping key with no matching field");
                }
                continue;
            }

            let revived = match declared.get(&key) {
                // Optional fields accept null; required ones reject it in their setter.
                Some(_) if json.is_null() => Revived::Value(Value::Null),
                Some(nested) => self.revive_at(json, nested, &path.join_field(&key))?,
                None => Revived::Value(json),
            };
            tracing::trace!(%path, type_name, field = %key, kind = %revived.kind(), "assigning field");

            instance
                .assign(&key, revived)
                .map_err(|err| err.at(path, type_name, &key))?;
        }

        if !missing.is_empty() {
            return Err(ReviveError::MissingField {
                path: path.clone(),
                type_name: type_name.to_owned(),
                fields: missing,
            });
        }

        if !self.options.assign_only {
            instance
                .finish()
                .map_err(|source| ReviveError::Construction {
                    path: path.clone(),
                    type_name: type_name.to_owned(),
                    source,
                })?;
        }

        Ok(Revived::Instance(instance))
    }
}

/// Fetch and normalize the schema an instance reports for itself.
///
/// The reported schema must describe the instance's own type; an array
/// schema or an object schema for another type is rejected.
fn reported_schema(
    instance: &dyn Instance,
    type_ref: &TypeRef,
    path: &FieldPath,
) -> Result<Option<ObjectSchema>, ReviveError> {
    let Some(schema) = instance.self_schema() else {
        return Ok(None);
    };

    let object = match schema.resolve() {
        ResolvedSchema::Object(object) => object.into_owned(),
        ResolvedSchema::Array(_) => {
            return Err(ReviveError::InvalidSchema {
                path: path.clone(),
                reason: format!(
                    "type {} reported an array schema for itself",
                    type_ref.name()
                ),
            })
        }
    };

    if !object.type_ref().same_type(type_ref) {
        return Err(ReviveError::InvalidSchema {
            path: path.clone(),
            reason: format!(
                "type {} reported a schema for type {}",
                type_ref.name(),
                object.type_ref().name()
            ),
        });
    }

    Ok(Some(object))
}

/// Explicit property schemas layered over self-reported ones.
struct DeclaredProperties<'a> {
    explicit: &'a ObjectSchema,
    reported: Option<&'a ObjectSchema>,
}

impl<'a> DeclaredProperties<'a> {
    fn get(&self, name: &str) -> Option<&'a Schema> {
        self.explicit
            .get(name)
            .or_else(|| self.reported.and_then(|reported| reported.get(name)))
    }

    /// Every declared property name, explicit first, without duplicates.
    fn names(&self) -> impl Iterator<Item = &'a str> {
        let explicit = self.explicit.properties();
        let reported = self
            .reported
            .into_iter()
            .flat_map(|reported| reported.properties().keys())
            .filter(move |name| !explicit.contains_key(name.as_str()));
        explicit.keys().chain(reported).map(String::as_str)
    }

    /// Every declared property must name a field the instance has.
    fn check_fields(&self, instance: &dyn Instance, path: &FieldPath) -> Result<(), ReviveError> {
        match self.names().find(|name| !instance.has_field(name)) {
            Some(name) => Err(ReviveError::InvalidSchema {
                path: path.clone(),
                reason: format!(
                    "property '{name}' is declared for type {} but the type has no such field",
                    instance.type_name()
                ),
            }),
            None => Ok(()),
        }
    }

    /// Declared properties with no key in `entries`, explicit first.
    fn missing(&self, entries: &Map<String, Value>) -> Vec<String> {
        self.names()
            .filter(|name| !entries.contains_key(*name))
            .map(str::to_owned)
            .collect()
    }
}
