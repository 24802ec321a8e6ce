//! rpc-smoke - fail-fast JSON-RPC smoke tests
//!
//! Sends an ordered list of JSON-RPC requests to a running node and exits
//! non-zero at the first failure: with the client's own exit code when the
//! request could not be delivered, 1 when the node answered with an error,
//! and 3 when the answer was not a JSON object.

use std::path::PathBuf;

use clap::Parser;
use rpc_smoke::common::logging;
use rpc_smoke::{cli, commands::Commands};

#[derive(Parser)]
#[command(name = "rpc-smoke", about = "Fail-fast JSON-RPC smoke tests")]
#[command(version, long_about = None)]
struct Cli {
    /// Config file (default: platform config dir, e.g. ~/.config/rpc-smoke/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.command.verbose());

    match cli::dispatch(cli.command, cli.config.as_deref()).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
