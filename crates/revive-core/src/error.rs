//! # Error Types — Revival Failure Taxonomy
//!
//! Every failure aborts the whole revival. There is no partial result and no
//! retry: failures are structural (schema and input disagree), never
//! transient.
//!
//! ## Design
//!
//! - `ReviveError` is what callers see. Every variant raised during the walk
//!   carries the `FieldPath` where it happened.
//! - `AssignError` is what a field setter returns. It knows nothing about
//!   paths; the reviver attaches them via [`AssignError::at`].
//! - `ConstructionError` is what a type's construction hook returns.

use thiserror::Error;

use crate::path::FieldPath;

/// Top-level error type for a revival call.
#[derive(Error, Debug)]
pub enum ReviveError {
    /// The JSON text could not be parsed.
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON value's shape does not match what the schema requires.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Location of the offending value.
        path: FieldPath,
        /// Shape or type the schema required.
        expected: String,
        /// Shape or type actually present.
        found: String,
    },

    /// The JSON object carries a key the target type has no field for.
    #[error("unknown field '{field}' for type {type_name} at {path}")]
    UnknownField {
        /// Location of the enclosing object.
        path: FieldPath,
        /// Name of the enclosing type.
        type_name: String,
        /// The offending key.
        field: String,
    },

    /// Declared properties have no corresponding key in the JSON object.
    #[error("missing {} for type {} at {}", describe_fields(.fields), .type_name, .path)]
    MissingField {
        /// Location of the enclosing object.
        path: FieldPath,
        /// Name of the enclosing type.
        type_name: String,
        /// Every declared property that was absent, explicit ones first.
        fields: Vec<String>,
    },

    /// The type's construction or post-revival hook failed.
    #[error("failed to construct {type_name} at {path}: {source}")]
    Construction {
        /// Location of the object being constructed.
        path: FieldPath,
        /// Name of the type.
        type_name: String,
        /// Error returned by the type.
        #[source]
        source: ConstructionError,
    },

    /// A field setter rejected the value it was given.
    #[error("invalid value for {type_name}.{field} at {path}: {reason}")]
    InvalidValue {
        /// Location of the field.
        path: FieldPath,
        /// Name of the enclosing type.
        type_name: String,
        /// Field name.
        field: String,
        /// Why the setter rejected the value.
        reason: String,
    },

    /// A type reported a schema that cannot describe its own instances.
    #[error("invalid schema at {path}: {reason}")]
    InvalidSchema {
        /// Location of the object whose type reported the schema.
        path: FieldPath,
        /// What was wrong with the reported schema.
        reason: String,
    },
}

/// `field 'a'` or `fields 'a', 'b'`.
fn describe_fields(fields: &[String]) -> String {
    let quoted = fields
        .iter()
        .map(|field| format!("'{field}'"))
        .collect::<Vec<_>>()
        .join(", ");
    if fields.len() == 1 {
        format!("field {quoted}")
    } else {
        format!("fields {quoted}")
    }
}

/// Error returned by a type's construction capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConstructionError {
    message: String,
}

impl ConstructionError {
    /// Create a construction error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message supplied by the type.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned by a single field setter.
#[derive(Error, Debug)]
pub enum AssignError {
    /// The revived value has the wrong shape for the field.
    #[error("expected {expected}, found {found}")]
    Shape {
        /// Shape the setter accepts.
        expected: String,
        /// Shape it was given.
        found: String,
    },

    /// A plain value could not be converted into the field's type.
    #[error("{0}")]
    Conversion(#[from] serde_json::Error),

    /// The target has no field of this name.
    #[error("no field named '{0}'")]
    NoSuchField(String),

    /// The setter refused the value for a domain reason.
    #[error("{0}")]
    Rejected(String),
}

impl AssignError {
    /// Shorthand for a shape mismatch.
    pub fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Shape {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Attach location context, turning a setter failure into a revival error.
    ///
    /// Shape mismatches surface as `TypeMismatch` at the field's own path, so
    /// a `null` handed to a required object field reads the same as any other
    /// shape error.
    pub fn at(self, path: &FieldPath, type_name: &str, field: &str) -> ReviveError {
        match self {
            Self::Shape { expected, found } => ReviveError::TypeMismatch {
                path: path.join_field(field),
                expected,
                found,
            },
            Self::NoSuchField(field) => ReviveError::UnknownField {
                path: path.clone(),
                type_name: type_name.to_owned(),
                field,
            },
            Self::Conversion(err) => ReviveError::InvalidValue {
                path: path.join_field(field),
                type_name: type_name.to_owned(),
                field: field.to_owned(),
                reason: err.to_string(),
            },
            Self::Rejected(reason) => ReviveError::InvalidValue {
                path: path.join_field(field),
                type_name: type_name.to_owned(),
                field: field.to_owned(),
                reason,
            },
        }
    }
}
