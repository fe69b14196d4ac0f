//! # revive CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Reviver CLI: rebuild typed object graphs from JSON.
///
/// Loads a schema document declaring record types, revives JSON documents
/// against it, and prints the result.
#[derive(Parser, Debug)]
#[command(name = "revive", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Revive a JSON document and print the annotated graph.
    Check(revive_cli::check::CheckArgs),
    /// Print the compiled schema document.
    Schema(revive_cli::schema::SchemaArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match &cli.command {
        Commands::Check(args) => revive_cli::check::run_check(args),
        Commands::Schema(args) => revive_cli::schema::run_schema(args),
    }
}
