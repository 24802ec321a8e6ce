//! Error types for the smoke-test runner
//!
//! These cover everything that stops a run before or around a request.
//! A request that was delivered and answered is never an `Error`: its
//! verdict is a [`StepOutcome`](crate::testing::StepOutcome) instead.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Client Errors ===
    #[error("Failed to launch '{program}': {source}")]
    ClientSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    // === Command Line Errors ===
    #[error("Invalid command line '{command}': {reason}")]
    InvalidCommand { command: String, reason: String },

    // === HTTP Errors ===
    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    // === Scenario Errors ===
    #[error("Scenario '{0}' has no steps")]
    EmptyScenario(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid command error
    pub fn invalid_command(command: &str, reason: impl ToString) -> Self {
        Self::InvalidCommand {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a client spawn error
    pub fn client_spawn(program: &str, source: io::Error) -> Self {
        Self::ClientSpawn {
            program: program.to_string(),
            source,
        }
    }
}
