//! # jddf CLI entry point
//!
//! Parses command-line arguments, initializes tracing and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jddf_cli::config::CliConfig;
use jddf_cli::validate::{run_validate, ValidateArgs};
use jddf_cli::verify::{run_verify, VerifyArgs};

/// JSON Data Definition Format toolkit.
///
/// Verifies JDDF schemas and validates JSON or YAML documents against them.
#[derive(Parser, Debug)]
#[command(name = "jddf", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (JSON or YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a schema is well-formed and internally consistent.
    Verify(VerifyArgs),

    /// Validate instance documents against a schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jddf CLI starting");

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Verify(args) => run_verify(&args, &mut stdout),
        Commands::Validate(args) => CliConfig::load(cli.config.as_deref())
            .and_then(|config| run_validate(&args, &config, &mut stdout)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
