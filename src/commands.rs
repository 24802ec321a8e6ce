//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::config::TransportKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a smoke-test scenario against a JSON-RPC endpoint
    Run {
        /// YAML scenario file (default: the built-in eth-smoke list)
        #[arg(long, short)]
        scenario: Option<PathBuf>,

        /// Endpoint as host:port or URL (default: localhost:51515)
        #[arg(long, short)]
        endpoint: Option<String>,

        /// How requests are delivered
        #[arg(long, value_enum)]
        transport: Option<TransportKind>,

        /// External HTTP client for the curl transport
        #[arg(long)]
        client: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Execute raw client command lines in order, stopping at the first failure
    Exec {
        /// Command lines, e.g. "curl --silent -X POST --data '{...}' localhost:51515"
        #[arg(required = true)]
        commands: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the requests of a scenario without sending them
    List {
        /// YAML scenario file (default: the built-in eth-smoke list)
        #[arg(long, short)]
        scenario: Option<PathBuf>,

        /// Print request bodies as JSON lines
        #[arg(long)]
        json: bool,
    },
}

/// Output verbosity shared by commands that send requests
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Show request bodies and raw responses
    #[arg(long, short)]
    pub verbose: bool,

    /// Only report failures
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Commands {
    /// Whether debug logging was asked for
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Run { output, .. } | Commands::Exec { output, .. } => output.verbose,
            Commands::List { .. } => false,
        }
    }
}
