//! # revive-cli — Reviver Command-Line Interface
//!
//! Revives JSON documents against schema documents from the shell, for
//! checking schemas and data files without writing Rust.
//!
//! ## Subcommands
//!
//! - `check`: revive a document and print the annotated graph
//! - `schema`: print the compiled root schema and declared types
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `Args` structs; handlers delegate to
//!   `revive-dynamic`.
//! - Results go to stdout, logs go to stderr through `tracing`.

pub mod check;
pub mod schema;
