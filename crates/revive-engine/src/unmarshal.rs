//! # Unmarshal Entry Points
//!
//! Text-in, typed-value-out wrappers around [`Reviver`]. The schema argument
//! accepts anything convertible into a [`Schema`], so a bare [`TypeRef`]
//! works as the constructor shorthand.

use revive_core::{FieldPath, Revivable, RevivalOptions, ReviveError, Revived, Schema, TypeRef};
use serde_json::Value;

use crate::reviver::Reviver;

/// Parse `json` and revive it against an object-shaped schema for `T`.
///
/// # Errors
///
/// `Parse` for malformed JSON, `TypeMismatch` when the root is not an object
/// or the schema does not produce a `T`, plus any error raised while reviving
/// nested values.
pub fn unmarshal<T: Revivable>(
    json: &str,
    schema: impl Into<Schema>,
    options: &RevivalOptions,
) -> Result<T, ReviveError> {
    let revived = unmarshal_value(json, &schema.into(), options)?;
    into_root::<T>(revived)
}

/// Parse `json` and revive it against an array schema whose items are `T`.
pub fn unmarshal_vec<T: Revivable>(
    json: &str,
    schema: impl Into<Schema>,
    options: &RevivalOptions,
) -> Result<Vec<T>, ReviveError> {
    let revived = unmarshal_value(json, &schema.into(), options)?;
    let found = revived.kind();
    revived
        .into_list::<T>()
        .map_err(|_| ReviveError::TypeMismatch {
            path: FieldPath::root(),
            expected: format!("array of {}", T::TYPE_NAME),
            found,
        })
}

/// Parse `json` and revive it against `schema`, returning the untyped graph.
pub fn unmarshal_value(
    json: &str,
    schema: &Schema,
    options: &RevivalOptions,
) -> Result<Revived, ReviveError> {
    let _span = tracing::debug_span!("unmarshal", %schema, bytes = json.len()).entered();

    let value: Value = serde_json::from_str(json)?;
    let revived = Reviver::new(*options).revive(value, schema)?;

    tracing::debug!(kind = %revived.kind(), "document revived");
    Ok(revived)
}

/// Revive an already-parsed JSON value against an object-shaped schema.
pub fn from_value<T: Revivable>(
    value: Value,
    schema: impl Into<Schema>,
    options: &RevivalOptions,
) -> Result<T, ReviveError> {
    let revived = Reviver::new(*options).revive(value, &schema.into())?;
    into_root::<T>(revived)
}

/// Constructor shorthand with default options: `from_str::<T>(json)` is
/// `unmarshal(json, TypeRef::of::<T>(), &RevivalOptions::default())`.
pub fn from_str<T: Revivable>(json: &str) -> Result<T, ReviveError> {
    unmarshal(json, TypeRef::of::<T>(), &RevivalOptions::default())
}

fn into_root<T: Revivable>(revived: Revived) -> Result<T, ReviveError> {
    let found = revived.kind();
    revived
        .into_instance::<T>()
        .map_err(|_| ReviveError::TypeMismatch {
            path: FieldPath::root(),
            expected: T::TYPE_NAME.to_owned(),
            found,
        })
}
