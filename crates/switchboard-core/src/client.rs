//! HTTP client for the ADK API server's two-step call protocol

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::events::{EventContent, TurnEvent};

/// Bound on the create-session call; the target only writes a session record.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on the run call; the target may execute an arbitrarily long turn.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Mint a session id.
///
/// The unix-seconds prefix keeps ids easy to correlate with logs; the random
/// suffix keeps concurrent same-second requests from colliding.
pub fn new_session_id() -> String {
    let stamp = Utc::now().timestamp();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("session-{}-{}", stamp, &nonce[..8])
}

/// Client for the ADK API servers hosting the registered agents.
///
/// One gateway request uses at most two calls: create a session, then run
/// the turn under it. Each call carries its own timeout and is never retried.
#[derive(Debug, Clone)]
pub struct AdkClient {
    client: Client,
    session_timeout: Duration,
    run_timeout: Duration,
}

impl Default for AdkClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AdkClient {
    /// Create a client with the standard bounds (10s create, 60s run).
    pub fn new() -> Self {
        Self::with_timeouts(SESSION_TIMEOUT, RUN_TIMEOUT)
    }

    /// Create a client with custom bounds.
    pub fn with_timeouts(session_timeout: Duration, run_timeout: Duration) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            session_timeout,
            run_timeout,
        }
    }

    /// Create a fresh session for `user_id` with the named agent.
    ///
    /// Posts an empty JSON object to
    /// `{base}/apps/{app}/users/{user}/sessions/{id}` and returns the minted
    /// session id. The upstream response body is not inspected.
    pub async fn create_session(
        &self,
        base_url: &str,
        app_name: &str,
        user_id: &str,
    ) -> Result<String, GatewayError> {
        let session_id = new_session_id();
        let url = format!(
            "{}/apps/{}/users/{}/sessions/{}",
            base_url, app_name, user_id, session_id
        );

        debug!(
            "Creating session {} for user {} with agent {}",
            session_id, user_id, app_name
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.session_timeout)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| request_error("create the session", self.session_timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        Ok(session_id)
    }

    /// Run one turn: send `message` under an existing session and return the
    /// event list exactly as the server produced it, in order. Selecting the
    /// final reply out of the list is the caller's concern.
    pub async fn run_turn(
        &self,
        base_url: &str,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<TurnEvent>, GatewayError> {
        let url = format!("{}/run", base_url);
        let body = RunRequest {
            app_name,
            user_id,
            session_id,
            new_message: EventContent::user_text(message),
        };

        debug!("Running turn for agent {} in session {}", app_name, session_id);

        let response = self
            .client
            .post(&url)
            .timeout(self.run_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error("run the turn", self.run_timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let events: Vec<TurnEvent> = response
            .json()
            .await
            .map_err(|e| GatewayError::Internal(format!("failed to parse turn events: {}", e)))?;

        debug!("Turn in session {} produced {} events", session_id, events.len());

        Ok(events)
    }
}

/// Map a transport failure onto the taxonomy: timeouts get their own
/// category, everything else is internal.
fn request_error(operation: &'static str, bound: Duration, err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::UpstreamTimeout {
            operation,
            seconds: bound.as_secs(),
        }
    } else {
        GatewayError::Internal(format!("failed to {}: {}", operation, err))
    }
}

/// Body of the run call.
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    app_name: &'a str,
    user_id: &'a str,
    session_id: &'a str,
    new_message: EventContent,
}
