//! Test utilities for integration tests.
//!
//! Provides a pre-seeded router and helpers for issuing method calls and
//! computing valid tokens.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use scoring_api::auth::{admin_token, user_token, AuthSecrets, ADMIN_LOGIN};
use scoring_api::server::{create_router, AppState, RouterConfig};
use scoring_api::store::{MemoryStore, Store};

/// Interests seeded for the known test clients.
pub const CLIENT_INTERESTS: [(i64, [&str; 2]); 2] =
    [(1001, ["int1", "int2"]), (1002, ["int3", "int4"])];

/// Build a router backed by a memory store seeded with test interests.
pub async fn seeded_router() -> Router {
    let store = MemoryStore::new();
    for (client_id, interests) in CLIENT_INTERESTS {
        store
            .cache_set(
                &format!("i:{}", client_id),
                json!(interests),
                Duration::from_secs(60 * 60),
            )
            .await;
    }

    let state = AppState::new(store, AuthSecrets::default());
    create_router(state, RouterConfig::new().with_tracing(false))
}

/// Insert a valid token for the body's login/account pair, mirroring what a
/// real client does.
pub fn set_valid_auth(body: &mut Value) {
    let secrets = AuthSecrets::default();
    let object = body.as_object_mut().expect("request body is an object");

    let token = if object.get("login").and_then(Value::as_str) == Some(ADMIN_LOGIN) {
        admin_token(&secrets)
    } else {
        let account = object
            .get("account")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let login = object
            .get("login")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        user_token(&account, &login, &secrets)
    };

    object.insert("token".to_string(), Value::from(token));
}

/// POST a JSON body to `/method` and return the raw response.
pub async fn post_method(router: Router, body: &Value) -> Response<axum::body::Body> {
    post_raw(router, body.to_string()).await
}

/// POST an arbitrary string body to `/method`.
pub async fn post_raw(router: Router, body: String) -> Response<axum::body::Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/method")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    router.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON and assert the envelope's embedded code
/// matches the HTTP status.
pub async fn envelope_of(response: Response<axum::body::Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("response body is JSON");
    assert_eq!(
        body["code"].as_u64(),
        Some(u64::from(status.as_u16())),
        "envelope code mirrors the HTTP status: {}",
        body
    );
    (status, body)
}
