//! Failure taxonomy for a single gateway request

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong while routing one request to an agent.
///
/// Errors are never retried or swallowed: any variant aborts the inbound
/// request and is reported to the caller with its category and detail.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requested agent name is not in the registry. A caller mistake,
    /// not a gateway fault; no outbound call has been made.
    #[error("agent '{0}' is not registered")]
    AgentNotFound(String),

    /// The target answered with a non-success status during session creation
    /// or the run. Status and body are preserved verbatim for the caller.
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The target did not answer within the bound for this call.
    #[error("upstream did not respond within {seconds}s while trying to {operation}")]
    UpstreamTimeout {
        operation: &'static str,
        seconds: u64,
    },

    /// Anything else: connection failures, malformed event bodies, bugs.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Machine-readable category for error bodies and logs.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AgentNotFound(_) => ErrorCategory::NotFound,
            Self::Upstream { .. } => ErrorCategory::UpstreamError,
            Self::UpstreamTimeout { .. } => ErrorCategory::UpstreamTimeout,
            Self::Internal(_) => ErrorCategory::InternalError,
        }
    }

    /// The target's HTTP status, when one exists to pass through.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Stable category labels carried in error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    NotFound,
    UpstreamError,
    UpstreamTimeout,
    InternalError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not-found",
            Self::UpstreamError => "upstream-error",
            Self::UpstreamTimeout => "upstream-timeout",
            Self::InternalError => "internal-error",
        };
        write!(f, "{}", label)
    }
}
