//! Request delivery
//!
//! A transport takes one JSON-RPC request to the node and hands back the raw
//! response body, or the exit code of a failed delivery. It never interprets
//! the body; that is the runner's job.

pub mod curl;
pub mod http;
pub mod process;

use async_trait::async_trait;

use crate::common::config::{Config, TransportKind};
use crate::common::{Error, Result};
use crate::rpc::Request;

pub use curl::CurlTransport;
pub use http::HttpTransport;

/// What came back from delivering one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The client finished; this is what it printed or received
    Body(String),
    /// The client failed before producing a usable response
    Failed { exit_code: i32, reason: String },
}

/// Trait for request transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short human description for progress output
    fn describe(&self) -> String;

    /// Deliver a request and wait for the outcome
    async fn call(&self, request: &Request) -> Result<Delivery>;
}

/// Transport settings after merging the config file with CLI flags
#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub kind: TransportKind,
    pub endpoint: String,
    pub client: std::path::PathBuf,
    pub extra_args: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl TransportSettings {
    /// Take everything but the endpoint from the config file
    pub fn from_config(config: &Config, endpoint: impl Into<String>) -> Self {
        Self {
            kind: config.client.transport,
            endpoint: endpoint.into(),
            client: config.client.path.clone(),
            extra_args: config.client.extra_args.clone(),
            timeout_secs: config.timeouts.request_secs,
        }
    }
}

/// Build the transport selected by `settings`
pub fn build(settings: &TransportSettings) -> Result<Box<dyn Transport>> {
    if settings.endpoint.trim().is_empty() {
        return Err(Error::InvalidEndpoint(settings.endpoint.clone()));
    }

    tracing::debug!(kind = ?settings.kind, endpoint = %settings.endpoint, "building transport");

    Ok(match settings.kind {
        TransportKind::Curl => Box::new(CurlTransport::new(
            settings.client.clone(),
            settings.endpoint.clone(),
            settings.extra_args.clone(),
            settings.timeout_secs,
        )),
        TransportKind::Http => Box::new(HttpTransport::new(
            &settings.endpoint,
            settings.timeout_secs,
        )?),
    })
}
