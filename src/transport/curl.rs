//! External HTTP client transport
//!
//! Spawns curl (or anything that speaks its flags) once per request. The
//! request body is passed as a single argument, so no quoting is involved.

use std::path::PathBuf;

use async_trait::async_trait;

use super::process::{self, EXIT_CLIENT_NOT_FOUND};
use super::{Delivery, Transport};
use crate::common::config::resolve_program;
use crate::common::Result;
use crate::rpc::Request;

/// Transport that shells out to an HTTP client binary
#[derive(Debug, Clone)]
pub struct CurlTransport {
    program: PathBuf,
    endpoint: String,
    extra_args: Vec<String>,
    max_time_secs: Option<u64>,
}

impl CurlTransport {
    pub fn new(
        program: PathBuf,
        endpoint: String,
        extra_args: Vec<String>,
        max_time_secs: Option<u64>,
    ) -> Self {
        Self {
            program,
            endpoint,
            extra_args,
            max_time_secs,
        }
    }

    /// Argument list for one request, endpoint last
    pub fn args_for(&self, request: &Request) -> Result<Vec<String>> {
        let mut args = vec![
            "--silent".to_string(),
            "-X".to_string(),
            "POST".to_string(),
            "-H".to_string(),
            "Content-Type: application/json".to_string(),
            "--data".to_string(),
            request.to_body()?,
        ];

        if let Some(secs) = self.max_time_secs {
            args.push("--max-time".to_string());
            args.push(secs.to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args.push(self.endpoint.clone());
        Ok(args)
    }
}

#[async_trait]
impl Transport for CurlTransport {
    fn describe(&self) -> String {
        format!("{} {}", self.program.display(), self.endpoint)
    }

    async fn call(&self, request: &Request) -> Result<Delivery> {
        let Some(program) = resolve_program(&self.program) else {
            return Ok(Delivery::Failed {
                exit_code: EXIT_CLIENT_NOT_FOUND,
                reason: format!("HTTP client '{}' not found", self.program.display()),
            });
        };

        let args = self.args_for(request)?;
        process::capture(&program, &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport(max_time_secs: Option<u64>, extra_args: Vec<String>) -> CurlTransport {
        CurlTransport::new(
            PathBuf::from("curl"),
            "localhost:51515".to_string(),
            extra_args,
            max_time_secs,
        )
    }

    #[test]
    fn test_body_is_a_single_argument() {
        let request = Request::new(
            "eth_getLogs",
            json!([{"fromBlock": "0x3d0900", "toBlock": "0x3d0964"}]),
            3,
        );
        let args = transport(None, Vec::new()).args_for(&request).unwrap();

        assert_eq!(
            args,
            vec![
                "--silent",
                "-X",
                "POST",
                "-H",
                "Content-Type: application/json",
                "--data",
                r#"{"jsonrpc":"2.0","method":"eth_getLogs","params":[{"fromBlock":"0x3d0900","toBlock":"0x3d0964"}],"id":3}"#,
                "localhost:51515",
            ]
        );
    }

    #[test]
    fn test_max_time_and_extra_args_precede_endpoint() {
        let request = Request::new("net_version", json!([]), 1);
        let args = transport(Some(10), vec!["--noproxy".into(), "*".into()])
            .args_for(&request)
            .unwrap();

        assert_eq!(
            &args[7..],
            &["--max-time", "10", "--noproxy", "*", "localhost:51515"]
        );
    }

    #[tokio::test]
    async fn test_missing_client_fails_with_127() {
        let transport = CurlTransport::new(
            PathBuf::from("/nonexistent/dir/curl"),
            "localhost:51515".to_string(),
            Vec::new(),
            None,
        );
        let delivery = transport
            .call(&Request::new("net_version", json!([]), 1))
            .await
            .unwrap();
        assert!(matches!(
            delivery,
            Delivery::Failed { exit_code: EXIT_CLIENT_NOT_FOUND, .. }
        ));
    }
}
