//! JSON-RPC 2.0 envelopes
//!
//! Requests are built as typed values and serialized, never spliced into
//! command strings. Responses are only inspected far enough to tell a
//! result from an error.

pub mod protocol;

pub use protocol::{classify, ErrorDetail, Request, Verdict, JSONRPC_VERSION};
