//! Mapping from the failure taxonomy onto HTTP responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use switchboard_core::{ErrorCategory, GatewayError};

use crate::protocol::ErrorResponse;

/// Renders a `GatewayError` as an HTTP response.
///
/// Handlers return `Result<_, ApiError>` so `?` on core calls converts
/// transparently via `From`.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for this failure. Upstream statuses pass through
    /// verbatim; one axum cannot represent degrades to 502. Timeouts map to
    /// 504 since no upstream status exists to pass through.
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            GatewayError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.category() {
            ErrorCategory::NotFound => warn!("{}", self.0),
            _ => error!("Request failed: {}", self.0),
        }

        let body = ErrorResponse {
            category: self.0.category(),
            detail: self.0.to_string(),
            upstream_status: self.0.upstream_status(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
