//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::common::{Error, Result};
use crate::rpc::Request;

/// A complete test scenario
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Endpoint to use unless overridden on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// The sequence of test steps to execute
    pub steps: Vec<TestStep>,
}

/// A single test step in the execution flow
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Send a JSON-RPC request through the configured transport
    Call {
        /// Method name (e.g., "eth_blockNumber")
        method: String,
        /// Positional or named params
        #[serde(default = "default_params")]
        params: Value,
        /// Request id
        #[serde(default = "default_id")]
        id: u64,
    },
    /// Run a full client command line as given
    Shell {
        /// Command line, split with POSIX shell quoting rules
        command: String,
    },
}

fn default_params() -> Value {
    Value::Array(Vec::new())
}

fn default_id() -> u64 {
    1
}

impl TestStep {
    /// Build a call step
    pub fn call(method: &str, params: Value, id: u64) -> Self {
        Self::Call {
            method: method.to_string(),
            params,
            id,
        }
    }

    /// Short label for progress output
    pub fn label(&self) -> &str {
        match self {
            Self::Call { method, .. } => method,
            Self::Shell { command } => command,
        }
    }

    /// The request this step sends, if it goes through a transport
    pub fn request(&self) -> Option<Request> {
        match self {
            Self::Call { method, params, id } => {
                Some(Request::new(method.clone(), params.clone(), *id))
            }
            Self::Shell { .. } => None,
        }
    }
}

impl TestScenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read test scenario '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    /// Parse a scenario from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: TestScenario = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))?;

        if scenario.steps.is_empty() {
            return Err(Error::EmptyScenario(scenario.name));
        }

        Ok(scenario)
    }
}
