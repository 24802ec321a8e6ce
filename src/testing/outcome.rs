//! Step and run outcomes and their exit codes

use std::fmt;

use crate::rpc::{ErrorDetail, Verdict};
use crate::transport::Delivery;

/// Exit code when every step passed
pub const EXIT_PASSED: i32 = 0;
/// Exit code when the node answered with an `error` member
pub const EXIT_RPC_ERROR: i32 = 1;
/// Exit code when the response was not a JSON object
pub const EXIT_MALFORMED_RESPONSE: i32 = 3;

/// Verdict for a single step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Passed,
    /// The client failed; its exit code is propagated as is
    ClientFailed { exit_code: i32, reason: String },
    RpcError(ErrorDetail),
    MalformedResponse(String),
}

impl StepOutcome {
    /// Combine what the transport delivered with what the body says
    pub fn from_delivery(delivery: Delivery) -> Self {
        match delivery {
            // A zero code from a failed client would read as success
            Delivery::Failed { exit_code, reason } => Self::ClientFailed {
                exit_code: if exit_code == EXIT_PASSED { 1 } else { exit_code },
                reason,
            },
            Delivery::Body(body) => Self::from_verdict(crate::rpc::classify(&body)),
        }
    }

    pub fn from_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Ok(_) => Self::Passed,
            Verdict::RpcError(detail) => Self::RpcError(detail),
            Verdict::Malformed(reason) => Self::MalformedResponse(reason),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Process exit code for a run that ended with this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Passed => EXIT_PASSED,
            Self::ClientFailed { exit_code, .. } => *exit_code,
            Self::RpcError(_) => EXIT_RPC_ERROR,
            Self::MalformedResponse(_) => EXIT_MALFORMED_RESPONSE,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::ClientFailed { exit_code, reason } => {
                write!(f, "client failed with exit code {}: {}", exit_code, reason)
            }
            Self::RpcError(detail) => write!(f, "node returned error: {}", detail),
            Self::MalformedResponse(reason) => write!(f, "malformed response: {}", reason),
        }
    }
}

/// Result of a test run
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub steps_run: usize,
    pub steps_total: usize,
    /// Outcome of the last step run; `Passed` only if every step passed
    pub outcome: StepOutcome,
    /// Label of the step that failed
    pub failed_step: Option<String>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}
