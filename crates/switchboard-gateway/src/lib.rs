//! HTTP gateway routing chat requests to named ADK agents
//!
//! Exposes the inbound API (`POST /run_agent`, `GET /health`, `GET /agents`)
//! and composes the core routing cycle: registry lookup, session creation,
//! turn run, final-reply extraction.

pub mod error;
pub mod protocol;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayServer, GatewayState, router};
