//! HTTP handlers for the scoring API.
//!
//! The whole API is one POST endpoint plus a health check:
//!
//! - `POST /method` - validate, authenticate, and dispatch a method call
//! - `GET /health`  - liveness probe
//!
//! Every response, success or failure, is wrapped in the same JSON envelope:
//! `{"response": ..., "code": 200}` or `{"error": ..., "code": <status>}`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::AuthSecrets;
use crate::method::{dispatch, Context};
use crate::store::Store;

/// Header carrying an inbound correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers.
pub struct AppState<S: Store> {
    /// The store handle shared by every in-flight call
    pub store: Arc<S>,

    /// Shared secrets for the token scheme
    pub secrets: AuthSecrets,
}

impl<S: Store> AppState<S> {
    /// Create state from a store and secrets.
    pub fn new(store: S, secrets: AuthSecrets) -> Self {
        Self {
            store: Arc::new(store),
            secrets,
        }
    }
}

impl<S: Store> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            secrets: self.secrets.clone(),
        }
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Envelope for successful calls.
#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    /// The handler's result object
    pub response: Map<String, Value>,

    /// Always 200
    pub code: u16,
}

/// Envelope for every non-200 outcome.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error text, or the status default when there is no detail to share
    pub error: String,

    /// The HTTP status code, repeated in the body
    pub code: u16,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// The default reason phrase echoed when an error carries no message.
pub fn default_reason(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::FORBIDDEN => "Forbidden",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::UNPROCESSABLE_ENTITY => "Invalid Request",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "Unknown Error",
    }
}

fn error_response(status: StatusCode, message: Option<String>) -> Response {
    let body = ApiError {
        error: message.unwrap_or_else(|| default_reason(status).to_string()),
        code: status.as_u16(),
    };
    (status, Json(body)).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle a method call.
///
/// # Endpoint
///
/// `POST /method`
///
/// # Request
///
/// A JSON object:
///
/// ```json
/// {
///   "account": "horns&hoofs",
///   "login": "h&f",
///   "method": "online_score",
///   "token": "55cc...",
///   "arguments": {"phone": "79175002040", "email": "stupnikov@otus.ru"}
/// }
/// ```
///
/// # Response
///
/// - `200 OK` - `{"response": <result>, "code": 200}`
/// - `400 Bad Request` - body is not a JSON object
/// - `403 Forbidden` - token check failed (no detail echoed)
/// - `422 Invalid Request` - validation failed or unknown method; the error
///   text lists every violation
/// - `500 Internal Server Error` - store or handler failure; detail is
///   logged server-side only
pub async fn method_handler<S: Store + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id_from_headers(&headers);
    let mut ctx = Context::new(request_id);

    let parsed: Option<Map<String, Value>> = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        });

    let Some(body) = parsed else {
        warn!(request_id = %ctx.request_id, "request body is not a JSON object");
        return error_response(StatusCode::BAD_REQUEST, None);
    };

    match dispatch(&body, &mut ctx, state.store.as_ref(), &state.secrets).await {
        Ok(result) => {
            info!(
                request_id = %ctx.request_id,
                has = ?ctx.has,
                nclients = ?ctx.nclients,
                "method call ok"
            );
            let envelope = ApiSuccess {
                response: result,
                code: StatusCode::OK.as_u16(),
            };
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                // Full detail stays server-side; the caller gets the
                // generic phrase.
                error!(
                    request_id = %ctx.request_id,
                    status = status.as_u16(),
                    "method call failed: {}",
                    err
                );
            } else {
                warn!(
                    request_id = %ctx.request_id,
                    status = status.as_u16(),
                    "method call rejected: {}",
                    err
                );
            }
            error_response(status, err.public_message())
        }
    }
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown routes: the JSON envelope with a 404.
pub async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, None)
}

/// The inbound correlation id, or a fresh one.
fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

// =============================================================================
// Tests
// =============================================================================
