//! Gateway HTTP server, Axum router and request orchestration

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use switchboard_core::{AdkClient, AgentRegistry, GatewayError, final_response};

use crate::error::ApiError;
use crate::protocol::{
    AgentListResponse, HealthResponse, RunAgentRequest, RunAgentResponse, STATUS_HEALTHY,
};

/// Shared state for all requests
#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<AgentRegistry>,
    pub client: AdkClient,
    /// Honor caller-supplied session ids instead of minting a fresh one.
    pub reuse_sessions: bool,
}

/// The gateway server
pub struct GatewayServer {
    state: GatewayState,
    bind: SocketAddr,
}

impl GatewayServer {
    /// Create a new gateway server over a registry built at startup.
    pub fn new(
        bind: SocketAddr,
        registry: AgentRegistry,
        client: AdkClient,
        reuse_sessions: bool,
    ) -> Self {
        let state = GatewayState {
            registry: Arc::new(registry),
            client,
            reuse_sessions,
        };
        Self { state, bind }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the server (blocks until shutdown)
    pub async fn run(self) -> anyhow::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.bind).await?;
        info!("Gateway listening on {}", self.bind);
        info!(
            "Serving {} registered agents: {}",
            self.state.registry.len(),
            self.state.registry.names().join(", ")
        );

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Start the server in the background, returning a handle
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

/// Build the router over explicit state. Integration tests drive this
/// directly without binding a socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/run_agent", post(run_agent_handler))
        .route("/health", get(health_handler))
        .route("/agents", get(list_agents_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── HTTP Handlers ──

async fn run_agent_handler(
    State(state): State<GatewayState>,
    Json(request): Json<RunAgentRequest>,
) -> Result<Json<RunAgentResponse>, ApiError> {
    let response = dispatch(&state, request).await?;
    Ok(Json(response))
}

async fn health_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: STATUS_HEALTHY.to_string(),
        agents: state.registry.names(),
    })
}

async fn list_agents_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(AgentListResponse {
        agents: state.registry.names(),
    })
}

/// One full routing cycle: registry lookup, session setup, turn run, reply
/// extraction.
///
/// At most two outbound calls are made, strictly in order; the run cannot
/// start before session setup has resolved a session id. A registry miss
/// fails before any outbound call.
async fn dispatch(
    state: &GatewayState,
    request: RunAgentRequest,
) -> Result<RunAgentResponse, GatewayError> {
    let base_url = state
        .registry
        .lookup(&request.agent_name)
        .ok_or_else(|| GatewayError::AgentNotFound(request.agent_name.clone()))?;

    info!(
        "Routing message from user {} to agent {}",
        request.user_id, request.agent_name
    );

    let session_id = match request.session_id.as_deref() {
        Some(id) if state.reuse_sessions && !id.is_empty() => id.to_string(),
        _ => {
            state
                .client
                .create_session(base_url, &request.agent_name, &request.user_id)
                .await?
        }
    };

    let events = state
        .client
        .run_turn(
            base_url,
            &request.agent_name,
            &request.user_id,
            &session_id,
            &request.message,
        )
        .await?;

    let answer = final_response(&events);

    info!(
        "Turn complete for agent {} (session {}, {} events)",
        request.agent_name,
        session_id,
        events.len()
    );

    Ok(RunAgentResponse::success(
        answer,
        session_id,
        request.agent_name,
    ))
}
