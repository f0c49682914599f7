//! ChainGen CLI.
//!
//! # Commands
//! ```text
//! chaingen codegen   [subgraph.yaml] [-o <dir>] [--config <file>] [--skip-validation]
//! chaingen validate  [subgraph.yaml] [--json]
//! chaingen resolve   <kind> [--json]
//! chaingen protocols
//! ```

use anyhow::{Context, Result};
use chaingen::{init_tracing, CodegenConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod cmd_codegen;
mod cmd_protocols;
mod cmd_validate;

#[derive(Parser)]
#[command(
    name = "chaingen",
    about = "Typed bindings for multi-protocol subgraphs",
    long_about = "
ChainGen CLI: resolve data source kinds to protocol families, validate
subgraph manifests, and generate AssemblyScript bindings for Ethereum ABIs
and Cosmos event definitions.

CONFIGURATION:
  chaingen.yaml in the working directory is read when --config is not given.
  Command-line flags override values from the file.
",
    version
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (default: ./chaingen.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate typed bindings for every ABI in a manifest
    Codegen {
        /// Subgraph manifest
        #[arg(default_value = "subgraph.yaml")]
        manifest: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Directory ABI paths are resolved against (default: the manifest's)
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Skip manifest validation
        #[arg(long)]
        skip_validation: bool,
        /// Accept networks the registry does not know
        #[arg(long)]
        skip_network_validation: bool,
    },

    /// Check a manifest without generating anything
    Validate {
        /// Subgraph manifest
        #[arg(default_value = "subgraph.yaml")]
        manifest: PathBuf,
        /// Accept networks the registry does not know
        #[arg(long)]
        skip_network_validation: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which protocol family a data source kind resolves to
    Resolve {
        /// Data source kind, e.g. ethereum/contract
        kind: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every registered protocol family
    Protocols,
}

async fn load_config(
    path: Option<&Path>,
    verbose: bool,
    json_logs: bool,
) -> Result<CodegenConfig> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let mut config = CodegenConfig::load_or_default(path, &cwd)
        .await
        .context("load config")?;
    if verbose {
        config.log.level = "debug".into();
    }
    if json_logs {
        config.log.json = true;
    }
    init_tracing(&config.log);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref(), cli.verbose, cli.json_logs).await?;

    match cli.command {
        Commands::Codegen {
            manifest,
            output_dir,
            source_dir,
            skip_validation,
            skip_network_validation,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if source_dir.is_some() {
                config.source_dir = source_dir;
            }
            config.skip_validation |= skip_validation;
            config.skip_network_validation |= skip_network_validation;
            cmd_codegen::run(config, &manifest).await
        }

        Commands::Validate {
            manifest,
            skip_network_validation,
            json,
        } => {
            config.skip_network_validation |= skip_network_validation;
            cmd_validate::run(config, &manifest, json).await
        }

        Commands::Resolve { kind, json } => cmd_protocols::resolve(&kind, json),

        Commands::Protocols => cmd_protocols::list(),
    }
}
