//! dmerge - Directive Merge CLI tool
//!
//! Merges configuration directives into a node's YAML config file, and
//! previews how raw directive values are coerced.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use directive_merge::{
    backup_path, coerce_with_rule, supports_overrides, value, Directives, Merger, NodeAttributes,
};

/// Merge typed configuration directives into a database node's YAML config
#[derive(Debug, Parser)]
#[command(name = "dmerge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge directives into a config file, keeping the original as a backup
    Merge(MergeArgs),

    /// Print the typed value of each raw directive value as JSON
    Coerce {
        /// Raw values, as a user would type them
        #[arg(required = true)]
        raw: Vec<String>,

        /// Also print the rule that produced each value
        #[arg(long)]
        explain: bool,
    },

    /// Print the backup path a merge would use for CONFIG
    BackupPath {
        config: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
struct MergeArgs {
    /// Config file to update in place
    config: PathBuf,

    /// Directive to apply; may be repeated. Wins over file directives.
    #[arg(short = 'd', long = "directive", value_name = "KEY=VALUE")]
    directives: Vec<String>,

    /// YAML or JSON mapping of directives
    #[arg(long, value_name = "FILE")]
    directives_file: Option<PathBuf>,

    /// Node attributes file (version, config_directives); gates the merge on
    /// the node version
    #[arg(long, value_name = "FILE")]
    attributes: Option<PathBuf>,

    /// First line of the generated header
    #[arg(long)]
    title: Option<String>,

    /// Leave the documentation link out of the generated header
    #[arg(long)]
    no_reference: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// A valid RUST_LOG wins; otherwise --verbose picks debug over warn.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let mut output = io::stdout().lock();

    match cli.command {
        Command::Merge(args) => merge(args, &mut output),
        Command::Coerce { raw, explain } => coerce(&raw, explain, &mut output),
        Command::BackupPath { config } => {
            writeln!(output, "{}", backup_path(&config).display())?;
            Ok(())
        }
    }
}

fn merge(args: MergeArgs, output: &mut dyn Write) -> Result<()> {
    let mut overrides = Directives::new();
    let mut version = None;

    if let Some(path) = &args.attributes {
        let attrs = NodeAttributes::from_file(path)?;
        version = Some(attrs.version());
        overrides.extend(attrs.directives());
    }
    if let Some(path) = &args.directives_file {
        overrides.extend(Directives::from_file(path)?);
    }
    overrides.extend(Directives::from_pairs(&args.directives)?);

    match version {
        Some(v) if !supports_overrides(v, &overrides) => {
            warn!(
                version = v,
                directives = overrides.len(),
                "node does not take config directives, leaving config untouched"
            );
            return Ok(());
        }
        None if overrides.is_empty() => {
            info!("no directives given, leaving config untouched");
            return Ok(());
        }
        _ => {}
    }

    let mut builder = Merger::builder();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if args.no_reference {
        builder = builder.reference(None);
    }

    let report = builder
        .build()
        .merge(&args.config, &overrides)
        .with_context(|| format!("merging directives into {}", args.config.display()))?;

    writeln!(
        output,
        "merged {} directive(s) into {} ({} new); original kept at {}",
        report.written.len(),
        report.config_path.display(),
        report.added.len(),
        report.backup_path.display()
    )?;
    Ok(())
}

fn coerce(raw: &[String], explain: bool, output: &mut dyn Write) -> Result<()> {
    for r in raw {
        let (coerced, rule) = coerce_with_rule(r);
        let json = value::to_json(&coerced).context("rendering coerced value")?;
        if explain {
            writeln!(output, "{}\t{}", json, rule)?;
        } else {
            writeln!(output, "{}", json)?;
        }
    }
    Ok(())
}
