//! Common test utilities.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use switchboard_core::{AdkClient, AgentRegistry};
use switchboard_gateway::{GatewayState, router};

/// Build a router whose registry points every agent at `upstream_uri`.
pub fn app_for(upstream_uri: &str, reuse_sessions: bool) -> Router {
    app_with_client(upstream_uri, AdkClient::new(), reuse_sessions)
}

/// Same, with a custom client (for timeout tests).
pub fn app_with_client(upstream_uri: &str, client: AdkClient, reuse_sessions: bool) -> Router {
    let registry = AgentRegistry::from_entries([
        ("calc_agent".to_string(), upstream_uri.to_string()),
        ("greeting_agent".to_string(), upstream_uri.to_string()),
    ])
    .unwrap();

    router(GatewayState {
        registry: Arc::new(registry),
        client,
        reuse_sessions,
    })
}

/// POST a JSON body and return (status, parsed response body).
pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    split(response).await
}

/// GET a path and return (status, parsed response body).
pub async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    split(response).await
}

async fn split(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Framework rejections (e.g. missing fields) have non-JSON bodies.
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
