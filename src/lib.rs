//! rpc-smoke - fail-fast JSON-RPC smoke tests
//!
//! This library builds JSON-RPC requests, delivers them through curl or an
//! in-process HTTP client, and runs ordered scenarios that stop at the first
//! failing call.

pub mod cli;
pub mod commands;
pub mod common;
pub mod rpc;
pub mod testing;
pub mod transport;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use rpc::Request;
pub use testing::{StepOutcome, TestResult};
