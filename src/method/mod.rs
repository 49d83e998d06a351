//! Method dispatch: the state machine between a raw request body and a
//! handler result.
//!
//! One call moves through a fixed pipeline, any stage of which may be
//! terminal:
//!
//! ```text
//! raw body ──▶ envelope validation ──▶ auth check ──▶ method lookup
//!                    │ 422                 │ 403           │ 422
//!                    ▼                     ▼               ▼
//!              argument validation ──▶ handler ──▶ result object
//!                    │ 422                 │ 500
//! ```
//!
//! The registry of methods is closed: a `match` over
//! [`score::METHOD_NAME`] and [`interests::METHOD_NAME`]. Dispatch itself
//! performs no I/O; only handlers touch the store.

pub mod envelope;
pub mod interests;
pub mod score;

pub use envelope::MethodRequest;
pub use interests::ClientsInterestsArgs;
pub use score::{OnlineScoreArgs, ADMIN_SCORE};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::{check_auth, AuthSecrets};
use crate::error::MethodError;
use crate::store::Store;

/// Names of the registered methods, in registry order.
pub const METHOD_NAMES: [&str; 2] = [score::METHOD_NAME, interests::METHOD_NAME];

/// Per-call metadata recorded for observability.
///
/// Handlers write into this; the transport logs it after the response is
/// built. It is never part of the response contract.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Context {
    /// Correlation id attached by the transport
    pub request_id: String,

    /// For `online_score`: names of the argument fields the caller supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has: Option<Vec<String>>,

    /// For `clients_interests`: how many client ids were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nclients: Option<usize>,
}

impl Context {
    /// Create a context carrying a correlation id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }
}

/// Validate, authenticate, and dispatch one request body.
///
/// Returns the handler's result object, or the terminal [`MethodError`]
/// describing which stage rejected the call.
pub async fn dispatch<S: Store + ?Sized>(
    body: &Map<String, Value>,
    ctx: &mut Context,
    store: &S,
    secrets: &AuthSecrets,
) -> Result<Map<String, Value>, MethodError> {
    let request = MethodRequest::parse(body)?;

    if !check_auth(&request, secrets) {
        return Err(MethodError::Forbidden);
    }

    let is_admin = request.is_admin();
    debug!(
        request_id = %ctx.request_id,
        method = %request.method,
        is_admin,
        "dispatching method call"
    );

    match request.method.as_str() {
        score::METHOD_NAME => {
            let args = OnlineScoreArgs::parse(&request.arguments)?;
            score::handle(&args, ctx, store, is_admin).await
        }
        interests::METHOD_NAME => {
            let args = ClientsInterestsArgs::parse(&request.arguments)?;
            interests::handle(&args, ctx, store, is_admin).await
        }
        unknown => Err(MethodError::UnknownMethod {
            method: unknown.to_string(),
            known: METHOD_NAMES.join(", "),
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================
