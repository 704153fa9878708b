//! Sigil CLI - command-line interface for the Sigil format.

use clap::{Parser, Subcommand};
use sigil_parser::ParseOptions;
use std::path::PathBuf;

mod commands;

/// Sigil - parse and check Sigil documents
#[derive(Parser)]
#[command(name = "sigil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Require call arguments to be fully quoted
    #[arg(long, global = true)]
    strict_args: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Sigil file and show the document
    Parse {
        /// Input file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check Sigil files for errors
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let options = ParseOptions {
        strict_arguments: cli.strict_args,
    };

    match cli.command {
        Commands::Parse { file, json } => commands::parse::run(&file, json, options),
        Commands::Check { files } => commands::check::run(&files, options),
    }
}
