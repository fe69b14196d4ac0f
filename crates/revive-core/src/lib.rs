//! # revive-core — Foundational Types for the Reviver
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: what a schema is, what a revivable type must provide, what a
//! revived value looks like, and how revival fails. It contains no
//! traversal logic; the recursive algorithm lives in `revive-engine`.
//!
//! ## Key Design Principles
//!
//! 1. **Closed schema model.** `Schema` has exactly three variants
//!    (`Constructor`, `Object`, `Array`). `Schema::resolve()` folds the
//!    constructor shorthand into an empty `ObjectSchema`, so downstream code
//!    matches on two cases only.
//!
//! 2. **No reflection.** Field assignment by name goes through a
//!    `FieldTable<T>`: an explicit registry of named setters supplied by the
//!    type. Unknown names are detectable without inspecting the type at
//!    runtime.
//!
//! 3. **Explicit capabilities.** A type that knows its own nested schema
//!    implements `HasSchema` and advertises it through
//!    `Revivable::as_has_schema`. The reviver asks; it never probes.
//!
//! 4. **Type-erased references.** `TypeRef` is a cheap `Arc` handle over a
//!    `Constructible`, so compiled types and runtime-declared record types
//!    flow through the same schema tree.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `revive-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod options;
pub mod path;
pub mod revived;
pub mod schema;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use error::{AssignError, ConstructionError, ReviveError};
pub use options::RevivalOptions;
pub use path::{FieldPath, PathSegment};
pub use revived::{json_kind, Revived};
pub use schema::{ArraySchema, ObjectSchema, ResolvedSchema, Schema};
pub use types::{Constructible, FieldTable, HasSchema, Instance, Revivable, TypeRef};
