//! # nis2 CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nis2_cli::analyze::{run_analyze, AnalyzeArgs};
use nis2_cli::resolve_config;

/// NIS2 Multi-Source Compliance Mapper
///
/// Submits compliance evidence (PDF, JSON, SQL/DDL) to the analysis backend
/// and shows which NIS2 domains and controls it maps to.
#[derive(Parser, Debug)]
#[command(name = "nis2", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the analysis backend. Overrides NIS2_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds (0 = none). Overrides NIS2_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a document for analysis and explore the findings.
    Analyze(AnalyzeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries the report; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "nis2 CLI starting");

    let result = resolve_config(cli.api_url.as_deref(), cli.timeout_secs).and_then(|config| {
        tracing::debug!(base_url = %config.base_url, "resolved backend configuration");
        match cli.command {
            Commands::Analyze(args) => run_analyze(&args, config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
