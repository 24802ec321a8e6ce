//! JSON-RPC message types
//!
//! Defines the request envelope sent to the node and the verdict drawn from
//! whatever comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol version carried by every request
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request envelope
///
/// Field order matches the wire order `jsonrpc, method, params, id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl Request {
    /// Create a request for `method` with the given params and id
    pub fn new(method: impl Into<String>, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Compact JSON body as sent on the wire
    pub fn to_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The `error` member of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub code: Option<i64>,
    pub message: Option<String>,
    /// The member exactly as received
    pub raw: Value,
}

impl ErrorDetail {
    fn from_value(raw: Value) -> Self {
        let code = raw.get("code").and_then(Value::as_i64);
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { code, message, raw }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{} (code {})", message, code),
            (None, Some(message)) => f.write_str(message),
            _ => write!(f, "{}", self.raw),
        }
    }
}

/// What a response body says about the request
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Object without an `error` member; carries `result` if present
    Ok(Option<Value>),
    /// Object with an `error` member, whatever its value
    RpcError(ErrorDetail),
    /// Not JSON, or JSON that is not an object
    Malformed(String),
}

/// Classify a response body
pub fn classify(body: &str) -> Verdict {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return Verdict::Malformed(format!("invalid JSON: {}", e)),
    };

    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Verdict::Malformed(format!("expected a JSON object, got {}", kind_of(&other)))
        }
    };

    if let Some(error) = object.remove("error") {
        return Verdict::RpcError(ErrorDetail::from_value(error));
    }

    Verdict::Ok(object.remove("result"))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = Request::new("web3_sha3", json!(["0x00"]), 1);
        assert_eq!(
            request.to_body().unwrap(),
            r#"{"jsonrpc":"2.0","method":"web3_sha3","params":["0x00"],"id":1}"#
        );
    }

    #[test]
    fn test_classify_result() {
        let verdict = classify(r#"{"jsonrpc":"2.0","id":1,"result":true}"#);
        assert_eq!(verdict, Verdict::Ok(Some(json!(true))));
    }

    #[test]
    fn test_classify_object_without_result_passes() {
        assert_eq!(classify(r#"{"jsonrpc":"2.0","id":1}"#), Verdict::Ok(None));
    }

    #[test]
    fn test_classify_error() {
        let verdict = classify(
            r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32000,"message":"invalid block range"}}"#,
        );
        match verdict {
            Verdict::RpcError(detail) => {
                assert_eq!(detail.code, Some(-32000));
                assert_eq!(detail.message.as_deref(), Some("invalid block range"));
                assert_eq!(detail.to_string(), "invalid block range (code -32000)");
            }
            other => panic!("Expected RpcError, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_null_error_still_fails() {
        let verdict = classify(r#"{"jsonrpc":"2.0","id":1,"result":"0x1","error":null}"#);
        match verdict {
            Verdict::RpcError(detail) => {
                assert_eq!(detail.raw, Value::Null);
                assert_eq!(detail.to_string(), "null");
            }
            other => panic!("Expected RpcError, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_invalid_json() {
        assert!(matches!(classify("curl: (7) Failed to connect"), Verdict::Malformed(_)));
        assert!(matches!(classify(""), Verdict::Malformed(_)));
    }

    #[test]
    fn test_classify_non_object() {
        match classify(r#"["error"]"#) {
            Verdict::Malformed(reason) => assert!(reason.contains("an array")),
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }
}
