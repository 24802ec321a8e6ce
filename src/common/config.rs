//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::Result;

/// Endpoint used when neither the CLI, the scenario nor the config file names one
pub const DEFAULT_ENDPOINT: &str = "localhost:51515";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Node under test
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// How requests are delivered
    #[serde(default)]
    pub client: ClientConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// How a JSON-RPC request reaches the node
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Spawn the external HTTP client (curl) once per request
    #[default]
    Curl,
    /// POST directly from this process
    Http,
}

/// Endpoint settings
#[derive(Debug, Deserialize)]
pub struct EndpointConfig {
    /// `host:port` or full URL of the JSON-RPC server
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

fn default_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Client settings
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Transport to use
    #[serde(default)]
    pub transport: TransportKind,

    /// Path or name of the external HTTP client
    #[serde(default = "default_client_path")]
    pub path: PathBuf,

    /// Extra arguments passed to the external client before the endpoint
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            path: default_client_path(),
            extra_args: Vec::new(),
        }
    }
}

fn default_client_path() -> PathBuf {
    PathBuf::from("curl")
}

/// Timeout settings in seconds
///
/// Unset or zero means the run waits as long as the client does.
#[derive(Debug, Deserialize, Default)]
pub struct Timeouts {
    /// Upper bound for a single request
    #[serde(default)]
    pub request_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

/// Find a program the way a shell would: explicit paths as given, bare names on PATH
pub fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.exists().then(|| program.to_path_buf());
    }
    which::which(program).ok()
}
