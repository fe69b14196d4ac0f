//! # Check Subcommand
//!
//! Revives a JSON document against a schema document and prints the
//! resulting graph, each record tagged with its `"$type"`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use revive_core::RevivalOptions;
use revive_dynamic::{CompiledDocument, SchemaDocument};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document (YAML or JSON) declaring the types and root schema.
    #[arg(long)]
    pub schema: PathBuf,

    /// Options file (YAML or JSON) with camelCase option keys.
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Fail on JSON keys the target type has no field for.
    #[arg(long)]
    pub fail_on_unknown_fields: bool,

    /// Fail when a declared property is absent from the JSON.
    #[arg(long)]
    pub fail_on_missing_fields: bool,

    /// Copy structure only: ignore self-reported schemas and hooks.
    #[arg(long)]
    pub assign_only: bool,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,

    /// JSON document to revive.
    pub document: PathBuf,
}

impl CheckArgs {
    /// Options from the options file, with any flag set on the command line
    /// switched on over it.
    pub fn revival_options(&self) -> anyhow::Result<RevivalOptions> {
        let base = match &self.options {
            Some(path) => {
                let text = read(path)?;
                RevivalOptions::from_yaml_str(&text)
                    .with_context(|| format!("invalid options file {}", path.display()))?
            }
            None => RevivalOptions::default(),
        };
        Ok(self.apply_flags(base))
    }

    fn apply_flags(&self, base: RevivalOptions) -> RevivalOptions {
        base.fail_on_unknown_fields(base.fail_on_unknown_fields || self.fail_on_unknown_fields)
            .fail_on_missing_fields(base.fail_on_missing_fields || self.fail_on_missing_fields)
            .assign_only(base.assign_only || self.assign_only)
    }
}

/// Revive `json` against a compiled document and render the annotated graph.
pub fn render(
    document: &CompiledDocument,
    json: &str,
    options: &RevivalOptions,
    pretty: bool,
) -> anyhow::Result<String> {
    let revived = document.revive(json, options)?.to_json();
    let text = if pretty {
        serde_json::to_string_pretty(&revived)?
    } else {
        serde_json::to_string(&revived)?
    };
    Ok(text)
}

/// Run the check subcommand, printing the revived graph to stdout.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<()> {
    let options = args.revival_options()?;
    let compiled = SchemaDocument::load(&args.schema)
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?
        .compile()
        .with_context(|| format!("cannot compile schema {}", args.schema.display()))?;
    let json = read(&args.document)?;

    tracing::info!(
        schema = %args.schema.display(),
        document = %args.document.display(),
        ?options,
        "reviving document"
    );
    let output = render(&compiled, &json, &options, args.pretty)
        .with_context(|| format!("cannot revive {}", args.document.display()))?;
    println!("{output}");
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
