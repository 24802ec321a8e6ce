//! Smoke test runner
//!
//! Runs an ordered list of JSON-RPC calls or raw client command lines
//! against a node and stops at the first one that fails. Scenarios come
//! from the built-in Ethereum list or from YAML files.

pub mod builtin;
pub mod command;
mod config;
mod outcome;
mod runner;

pub use command::run_shell_command;
pub use config::*;
pub use outcome::*;
pub use runner::{run_scenario, scenario_from_commands, RunOptions};
