//! oxide-snowflake CLI
//!
//! Host-side entry point for creating, diffing and deleting objects.
//! Property bags are passed and printed as JSON.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_provider::prelude::*;
use oxide_snowflake::{ProviderConfig, ResourceKind};

/// Declarative lifecycle for schemas, stages and file formats.
#[derive(Parser)]
#[command(name = "oxide-snowflake")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ProviderConfig,

    /// Print statements instead of executing them.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an object and print its id and outputs.
    Create {
        /// Resource kind.
        #[arg(short, long, value_enum)]
        kind: ResourceKind,

        /// Input properties as a JSON object.
        #[arg(short, long)]
        inputs: String,
    },

    /// Compare recorded and desired properties.
    Diff {
        /// Resource kind.
        #[arg(short, long, value_enum)]
        kind: ResourceKind,

        /// Object id returned by `create`.
        #[arg(long)]
        id: String,

        /// Recorded properties as a JSON object.
        #[arg(long)]
        old: String,

        /// Desired properties as a JSON object.
        #[arg(long)]
        new: String,
    },

    /// Drop an object.
    Delete {
        /// Resource kind.
        #[arg(short, long, value_enum)]
        kind: ResourceKind,

        /// Object id returned by `create`.
        #[arg(long)]
        id: String,

        /// Recorded properties as a JSON object.
        #[arg(short, long)]
        props: String,
    },

    /// List resource kinds and their attributes.
    Kinds,
}

impl Commands {
    fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Create { kind, .. } | Self::Diff { kind, .. } | Self::Delete { kind, .. } => {
                Some(*kind)
            }
            Self::Kinds => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for JSON results
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    cli.config.validate()?;

    let Some(kind) = cli.command.kind() else {
        print_kinds();
        return Ok(());
    };

    let context = Arc::new(cli.config.context());
    let generator = kind.generator();

    if cli.dry_run {
        info!("Dry run mode - SQL will be printed but not executed.");
        let provider = ResourceProvider::new(generator, DryRunExecutor::new(), context);
        run(&provider, cli.command).await?;
        write_statements(&mut std::io::stderr().lock(), &provider.executor().statements())?;
    } else {
        let executor = cli.config.executor()?;
        let provider = ResourceProvider::new(generator, executor, context);
        run(&provider, cli.command).await?;
    }

    Ok(())
}

async fn run<G, E>(provider: &ResourceProvider<G, E>, command: Commands) -> anyhow::Result<()>
where
    G: StatementGenerator,
    E: SqlExecutor,
{
    match command {
        Commands::Create { inputs, .. } => {
            let inputs = parse_properties("inputs", &inputs)?;
            let result = provider.create(&inputs).await?;
            print_json(&result)?;
        }

        Commands::Diff { id, old, new, .. } => {
            let old = parse_properties("old", &old)?;
            let new = parse_properties("new", &new)?;
            print_json(&provider.diff(&id, &old, &new))?;
        }

        Commands::Delete { id, props, .. } => {
            let props = parse_properties("props", &props)?;
            provider.delete(&id, &props).await?;
        }

        Commands::Kinds => unreachable!("kinds needs no provider"),
    }

    Ok(())
}

fn parse_properties(arg: &str, json: &str) -> anyhow::Result<Properties> {
    serde_json::from_str(json).with_context(|| format!("--{arg} is not a JSON object"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes dry-run statements, one per line. Never given stdout, which carries
/// the JSON result.
fn write_statements(out: &mut impl Write, statements: &[String]) -> std::io::Result<()> {
    for sql in statements {
        writeln!(out, "{sql};")?;
    }
    Ok(())
}

fn print_kinds() {
    for kind in ResourceKind::ALL {
        let generator = kind.generator();
        let descriptor = generator.descriptor();
        println!("{kind}");
        for attribute in descriptor.attributes() {
            let mut notes = Vec::new();
            if attribute.required {
                notes.push("required");
            }
            if descriptor.create_flags().contains(&attribute.name) {
                notes.push("flag");
            }
            if notes.is_empty() {
                println!("  {}", attribute.name);
            } else {
                println!("  {} ({})", attribute.name, notes.join(", "));
            }
        }
    }
}
