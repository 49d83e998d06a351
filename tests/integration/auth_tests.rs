//! Authentication tests: user tokens, admin hour-bucketed tokens, and
//! tampering.

use axum::http::StatusCode;
use serde_json::json;

use scoring_api::auth::{admin_token, user_token, AuthSecrets};

use super::test_utils::{envelope_of, post_method, seeded_router, set_valid_auth};

#[tokio::test]
async fn test_missing_token_is_forbidden() {
    let body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "token": "",
        "arguments": {"first_name": "a", "last_name": "b"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    // Forbidden responses carry no detail beyond the phrase.
    assert_eq!(envelope["error"], "Forbidden");
}

#[tokio::test]
async fn test_garbage_token_is_forbidden() {
    let body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "token": "sdd",
        "arguments": {"first_name": "a", "last_name": "b"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, _) = envelope_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tampered_token_is_forbidden() {
    let secrets = AuthSecrets::default();
    let mut token = user_token("horns&hoofs", "h&f", &secrets);
    let flipped = if token.starts_with('0') { "1" } else { "0" };
    token.replace_range(0..1, flipped);

    let body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "token": token,
        "arguments": {"first_name": "a", "last_name": "b"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, _) = envelope_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_for_other_identity_is_forbidden() {
    let secrets = AuthSecrets::default();
    let body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "token": user_token("horns&hoofs", "someone-else", &secrets),
        "arguments": {"first_name": "a", "last_name": "b"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, _) = envelope_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_token_with_admin_login_is_forbidden() {
    // Admin auth only accepts the hour-bucketed digest.
    let secrets = AuthSecrets::default();
    let body = json!({
        "account": "horns&hoofs",
        "login": "admin",
        "method": "online_score",
        "token": user_token("horns&hoofs", "admin", &secrets),
        "arguments": {"phone": "79175002040", "email": "stupnikov@otus.ru"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, _) = envelope_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_bypass_returns_constant_score() {
    let secrets = AuthSecrets::default();
    let body = json!({
        "account": "horns&hoofs",
        "login": "admin",
        "method": "online_score",
        "token": admin_token(&secrets),
        "arguments": {"phone": "79175002040", "email": "stupnikov@otus.ru"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["response"]["score"], json!(42));
}

#[tokio::test]
async fn test_valid_user_token_authorizes() {
    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "arguments": {"first_name": "a", "last_name": "b"},
    });
    set_valid_auth(&mut body);

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["response"]["score"].as_f64(), Some(0.5));
}

#[tokio::test]
async fn test_auth_rejects_before_validation_of_arguments() {
    // Broken arguments with a bad token: auth wins, 403 not 422.
    let body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "token": "bogus",
        "arguments": {"phone": "invalid"},
    });

    let response = post_method(seeded_router().await, &body).await;
    let (status, _) = envelope_of(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
