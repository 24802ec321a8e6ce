//! In-process HTTP transport
//!
//! POSTs the request with reqwest. Failures are reported with the exit codes
//! curl would have used, so both transports share one exit-code table.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::{Delivery, Transport};
use crate::common::{Error, Result};
use crate::rpc::Request;

/// curl's code for "failed to connect to host"
pub const EXIT_CONNECT_FAILED: i32 = 7;
/// curl's code for "operation timed out"
pub const EXIT_TIMED_OUT: i32 = 28;
/// Any other transport failure
pub const EXIT_TRANSPORT_FAILED: i32 = 1;

/// Transport that talks HTTP directly
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    /// Create a transport for `endpoint`, which may omit the scheme
    ///
    /// A timeout of zero means no limit, as with curl's `--max-time 0`.
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let url = endpoint_url(endpoint)?;

        let mut builder = reqwest::Client::builder().user_agent("rpc-smoke");
        if let Some(secs) = timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { client, url })
    }
}

/// Turn `host:port` or a full URL into a URL, defaulting to plain http
pub fn endpoint_url(endpoint: &str) -> Result<Url> {
    let endpoint = endpoint.trim();
    let candidate = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };

    let url = Url::parse(&candidate).map_err(|_| Error::InvalidEndpoint(endpoint.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(Error::InvalidEndpoint(endpoint.to_string())),
    }
}

/// Exit code curl would have reported for this failure
fn exit_code_for(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        EXIT_TIMED_OUT
    } else if err.is_connect() {
        EXIT_CONNECT_FAILED
    } else {
        EXIT_TRANSPORT_FAILED
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn call(&self, request: &Request) -> Result<Delivery> {
        let body = request.to_body()?;

        let response = match self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "request failed");
                return Ok(Delivery::Failed {
                    exit_code: exit_code_for(&e),
                    reason: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Like curl without --fail: the body still decides the verdict
            tracing::debug!(%status, method = %request.method, "non-success HTTP status");
        }

        match response.text().await {
            Ok(text) => Ok(Delivery::Body(text)),
            Err(e) => Ok(Delivery::Failed {
                exit_code: exit_code_for(&e),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_without_scheme_defaults_to_http() {
        let url = endpoint_url("localhost:51515").unwrap();
        assert_eq!(url.as_str(), "http://localhost:51515/");
    }

    #[test]
    fn test_endpoint_with_scheme_is_kept() {
        let url = endpoint_url("https://node.example:8545/rpc").unwrap();
        assert_eq!(url.as_str(), "https://node.example:8545/rpc");
    }

    #[test]
    fn test_endpoint_with_other_scheme_is_rejected() {
        assert!(matches!(
            endpoint_url("ws://localhost:8546"),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn test_posts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .match_body(r#"{"jsonrpc":"2.0","method":"net_listening","params":[],"id":1}"#)
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":true}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), None).unwrap();
        let delivery = transport
            .call(&Request::new("net_listening", json!([]), 1))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            delivery,
            Delivery::Body(r#"{"jsonrpc":"2.0","id":1,"result":true}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32000,"message":"invalid block range"}}"#;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body(body)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), None).unwrap();
        let delivery = transport
            .call(&Request::new("eth_getLogs", json!([]), 3))
            .await
            .unwrap();

        assert_eq!(delivery, Delivery::Body(body.to_string()));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_7() {
        // Grab a free port, then close it so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&addr.to_string(), Some(5)).unwrap();
        match transport
            .call(&Request::new("web3_clientVersion", json!([]), 1))
            .await
            .unwrap()
        {
            Delivery::Failed { exit_code, .. } => assert_eq!(exit_code, EXIT_CONNECT_FAILED),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_timeout_means_no_limit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), Some(0)).unwrap();
        let delivery = transport
            .call(&Request::new("eth_blockNumber", json!([]), 1))
            .await
            .unwrap();

        assert_eq!(
            delivery,
            Delivery::Body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_silent_server_times_out_with_28() {
        // Accept connections and hold them open without ever answering
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let transport = HttpTransport::new(&addr.to_string(), Some(1)).unwrap();
        let delivery = transport
            .call(&Request::new("eth_syncing", json!([]), 1))
            .await
            .unwrap();
        server.abort();

        match delivery {
            Delivery::Failed { exit_code, .. } => assert_eq!(exit_code, EXIT_TIMED_OUT),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }
}
