//! Turn events returned by an ADK agent and the final-reply selection rule

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role string agents use for their own replies.
pub const MODEL_ROLE: &str = "model";

/// Role string for caller messages.
pub const USER_ROLE: &str = "user";

/// Fallback reply when a turn produces no eligible model text.
pub const NO_RESPONSE_FALLBACK: &str = "no response produced";

/// One record in the ordered event list an agent emits for a turn.
///
/// Agents attach many other fields (author, invocation id, tool activity);
/// only `content` matters for reply selection, and unknown fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EventContent>,
}

/// Message content carried by an event, or sent as the new message of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

/// One element of a content's parts sequence.
///
/// Agents emit text parts, function calls, inline data and whatever else the
/// protocol grows; anything that is not an object deserializes into the raw
/// fallback instead of failing the whole event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Object(PartObject),
    Other(Value),
}

/// Object form of a part. Only `text` is meaningful to the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// A part wrapping plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Object(PartObject {
            text: Some(text.into()),
        })
    }

    /// The text carried by this part, if it is an object with a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Object(fields) => fields.text.as_deref(),
            Part::Other(_) => None,
        }
    }
}

impl EventContent {
    /// Content holding a single user text part, shaped as the run call expects.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(USER_ROLE.to_string()),
            parts: Some(vec![Part::text(text)]),
        }
    }
}

impl TurnEvent {
    /// The reply text of this event, when it qualifies as a model reply.
    ///
    /// All four conditions must hold: content is present, its role equals
    /// [`MODEL_ROLE`], a parts sequence is present, and the first part is an
    /// object carrying text. Parts after the first are never consulted.
    pub fn model_text(&self) -> Option<&str> {
        let content = self.content.as_ref()?;
        if content.role.as_deref() != Some(MODEL_ROLE) {
            return None;
        }
        content.parts.as_ref()?.first()?.as_text()
    }
}

/// Select the reply for a turn from its raw event list.
///
/// Scans in original order and overwrites with each eligible event's text, so
/// the last eligible event wins. Returns [`NO_RESPONSE_FALLBACK`] unchanged
/// when no event qualifies. Never aggregates across events.
pub fn final_response(events: &[TurnEvent]) -> String {
    let mut reply = NO_RESPONSE_FALLBACK;
    for event in events {
        if let Some(text) = event.model_text() {
            reply = text;
        }
    }
    reply.to_string()
}
