//! Core routing logic for the switchboard gateway
//!
//! This crate provides:
//! - `AgentRegistry`: the static name → base-URL map agents are resolved from
//! - `AdkClient`: the two-step call protocol against an ADK API server
//!   (create a session, then run the turn)
//! - Turn-event types and `final_response`, the rule that selects one reply
//!   out of a turn's event list
//! - `GatewayError`: the failure taxonomy shared by every surface

pub mod client;
pub mod error;
pub mod events;
pub mod registry;

pub use client::{AdkClient, RUN_TIMEOUT, SESSION_TIMEOUT, new_session_id};
pub use error::{ErrorCategory, GatewayError};
pub use events::{
    EventContent, MODEL_ROLE, NO_RESPONSE_FALLBACK, Part, TurnEvent, USER_ROLE, final_response,
};
pub use registry::AgentRegistry;
