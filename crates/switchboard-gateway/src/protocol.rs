//! Request and response shapes for the gateway's HTTP API

use serde::{Deserialize, Serialize};
use switchboard_core::ErrorCategory;

/// Status value reported in every successful run response.
pub const STATUS_SUCCESS: &str = "success";

/// Status value reported by the health endpoint.
pub const STATUS_HEALTHY: &str = "healthy";

/// POST /run_agent request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAgentRequest {
    pub agent_name: String,
    pub message: String,
    pub user_id: String,
    /// Honored only when session reuse is enabled in the gateway config;
    /// by default every call starts a fresh session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// POST /run_agent success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAgentResponse {
    pub response: String,
    pub session_id: String,
    pub agent_name: String,
    pub status: String,
}

impl RunAgentResponse {
    pub fn success(response: String, session_id: String, agent_name: String) -> Self {
        Self {
            response,
            session_id,
            agent_name,
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

/// GET /health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub agents: Vec<String>,
}

/// GET /agents body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentListResponse {
    pub agents: Vec<String>,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub category: ErrorCategory,
    pub detail: String,
    /// The target's status, passed through verbatim when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}
