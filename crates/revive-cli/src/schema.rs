//! # Schema Subcommand
//!
//! Compiles a schema document and prints what the reviver will apply: the
//! root schema, then every declared type with its fields and self-reported
//! schema.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use revive_dynamic::{CompiledDocument, SchemaDocument};

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,
}

/// Human-readable description of a compiled document.
pub fn describe(document: &CompiledDocument) -> anyhow::Result<String> {
    let registry = document.registry();
    let mut out = String::new();
    writeln!(out, "root: {}", document.root())?;
    for name in registry.names() {
        let fields = registry
            .get(name)
            .map(|def| def.fields.join(", "))
            .unwrap_or_default();
        write!(out, "type {name} ({fields})")?;
        if let Some(reported) = registry.reported_schema(name)? {
            write!(out, " reports {reported}")?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Run the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> anyhow::Result<()> {
    let compiled = SchemaDocument::load(&args.schema)
        .and_then(SchemaDocument::compile)
        .with_context(|| format!("invalid schema document {}", args.schema.display()))?;
    tracing::debug!(types = compiled.registry().len(), "describing schema document");
    print!("{}", describe(&compiled)?);
    Ok(())
}
