//! acw CLI - Arcade Coder wiki site configuration.
//!
//! Provides commands for:
//! - `check`: Validate `acw.toml` and check the sidebar against the content directory
//! - `export`: Print the configuration in the site generator's schema
//! - `init`: Write a starter configuration and content tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, InitArgs};
use output::Output;

/// acw - Arcade Coder wiki site configuration.
#[derive(Parser)]
#[command(name = "acw", version, about)]
struct Cli {
    /// Enable verbose output (config discovery and content scanning logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and check it against the content directory.
    Check(CheckArgs),
    /// Print the configuration for the site generator.
    Export(ExportArgs),
    /// Write a starter configuration.
    Init(InitArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Export(args) => args.execute(&output),
        Commands::Init(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
