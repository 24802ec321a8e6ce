//! Raw command line steps
//!
//! A command line such as
//! `curl --silent -X POST --data '{"jsonrpc":"2.0",...}' localhost:51515`
//! is split with POSIX shell quoting rules and run directly, without a shell.

use std::path::Path;

use super::outcome::StepOutcome;
use crate::common::{Error, Result};
use crate::transport::{process, Delivery};

/// Split a command line into program and arguments
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(command).map_err(|e| Error::invalid_command(command, e))?;
    if argv.is_empty() {
        return Err(Error::invalid_command(command, "empty command"));
    }
    Ok(argv)
}

/// Run one command line and judge its output
pub async fn run_shell_command(command: &str) -> Result<StepOutcome> {
    let delivery = execute(command).await?;
    Ok(StepOutcome::from_delivery(delivery))
}

/// Run one command line and return what it delivered
pub async fn execute(command: &str) -> Result<Delivery> {
    let argv = tokenize(command)?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::invalid_command(command, "empty command"))?;

    process::capture(Path::new(program), args).await
}
