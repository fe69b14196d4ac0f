//! # revive-dynamic — Schemas as Data
//!
//! Compiled types describe themselves in code through `Revivable`. This crate
//! covers the other case: types declared at runtime in a YAML or JSON schema
//! document. Each declared type is revived into a [`Record`], and records
//! with a declared `schema` section report it exactly like a compiled type
//! implementing `HasSchema`.
//!
//! ```
//! use revive_core::RevivalOptions;
//! use revive_dynamic::SchemaDocument;
//!
//! let document = SchemaDocument::parse(
//!     "types:\n  Job: { fields: [title] }\n  Person: { fields: [name, job], schema: { job: Job } }\nroot: Person\n",
//! )?
//! .compile()?;
//!
//! let person = document.revive(
//!     r#"{"name": "Ann", "job": {"title": "Dev"}}"#,
//!     &RevivalOptions::default(),
//! )?;
//! assert_eq!(
//!     person.to_json()["job"]["$type"],
//!     serde_json::json!("Job")
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Document errors are reported when a document is compiled, never during
//!   revival.
//! - The registry holds declarations only; type references are created on
//!   demand, so self-referencing types need no special handling.

pub mod document;
pub mod record;
pub mod registry;

pub use document::{
    ArraySpec, CompiledDocument, ObjectSpec, SchemaDocument, SchemaDocumentError, SchemaSpec,
    TypeDef,
};
pub use record::{Record, RecordValue, TYPE_KEY};
pub use registry::TypeRegistry;
