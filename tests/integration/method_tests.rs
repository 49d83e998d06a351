//! Method flow tests: happy paths, validation failures, and the response
//! envelope.

use axum::http::StatusCode;
use serde_json::json;

use super::test_utils::{envelope_of, post_method, post_raw, seeded_router, set_valid_auth};

// =============================================================================
// clients_interests
// =============================================================================

#[tokio::test]
async fn test_clients_interests_success() {
    let router = seeded_router().await;

    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "clients_interests",
        "arguments": {"client_ids": [1001, 1002]},
    });
    set_valid_auth(&mut body);

    let response = post_method(router, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        envelope["response"],
        json!({"1001": ["int1", "int2"], "1002": ["int3", "int4"]})
    );
}

#[tokio::test]
async fn test_clients_interests_unknown_client_is_server_error() {
    let router = seeded_router().await;

    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "clients_interests",
        "arguments": {"client_ids": [4242]},
    });
    set_valid_auth(&mut body);

    let response = post_method(router, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Store detail must not leak; only the generic phrase comes back.
    assert_eq!(envelope["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_clients_interests_invalid_arguments() {
    for arguments in [
        json!({}),
        json!({"date": "20.07.2017"}),
        json!({"client_ids": [], "date": "20.07.2017"}),
        json!({"client_ids": ["1", "2"]}),
        json!({"client_ids": [1, 2], "date": "XXX"}),
    ] {
        let mut body = json!({
            "account": "horns&hoofs",
            "login": "h&f",
            "method": "clients_interests",
            "arguments": arguments,
        });
        set_valid_auth(&mut body);

        let response = post_method(seeded_router().await, &body).await;
        let (status, envelope) = envelope_of(response).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
        assert!(!envelope["error"].as_str().unwrap().is_empty());
    }
}

// =============================================================================
// online_score
// =============================================================================

#[tokio::test]
async fn test_online_score_success() {
    let router = seeded_router().await;

    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "arguments": {"phone": "79175002040", "email": "stupnikov@otus.ru"},
    });
    set_valid_auth(&mut body);

    let response = post_method(router, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::OK);
    let score = envelope["response"]["score"].as_f64().unwrap();
    assert_eq!(score, 3.0);
}

#[tokio::test]
async fn test_online_score_integer_phone_normalizes() {
    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "arguments": {"phone": 79175002040i64, "email": "stupnikov@otus.ru"},
    });
    set_valid_auth(&mut body);

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["response"]["score"].as_f64(), Some(3.0));
}

#[tokio::test]
async fn test_online_score_incomplete_pair_is_invalid() {
    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "arguments": {"phone": "79175002040"},
    });
    set_valid_auth(&mut body);

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = envelope["error"].as_str().unwrap();
    assert!(message.contains("email/phone"), "{}", message);
}

#[tokio::test]
async fn test_online_score_accumulates_all_field_errors() {
    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "online_score",
        "arguments": {
            "phone": "89175002040",
            "email": "no-at-sign",
            "gender": -1,
        },
    });
    set_valid_auth(&mut body);

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = envelope["error"].as_str().unwrap();
    assert!(message.contains("phone"), "{}", message);
    assert!(message.contains("email"), "{}", message);
    assert!(message.contains("gender"), "{}", message);
}

// =============================================================================
// Envelope / routing
// =============================================================================

#[tokio::test]
async fn test_unknown_method_lists_valid_ones() {
    let mut body = json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "method": "delete_everything",
        "arguments": {},
    });
    set_valid_auth(&mut body);

    let response = post_method(seeded_router().await, &body).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = envelope["error"].as_str().unwrap();
    assert!(message.contains("delete_everything"), "{}", message);
    assert!(message.contains("online_score"), "{}", message);
    assert!(message.contains("clients_interests"), "{}", message);
}

#[tokio::test]
async fn test_empty_envelope_reports_all_missing_fields() {
    let response = post_method(seeded_router().await, &json!({})).await;
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = envelope["error"].as_str().unwrap();
    for field in ["login", "token", "arguments", "method"] {
        assert!(message.contains(field), "missing {} in {}", field, message);
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    for raw in ["{not json", "[1, 2, 3]", "\"just a string\"", ""] {
        let response = post_raw(seeded_router().await, raw.to_string()).await;
        let (status, envelope) = envelope_of(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", raw);
        assert_eq!(envelope["error"], "Bad Request");
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = seeded_router().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/other_method")
        .body(axum::body::Body::from("{}"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
    let (status, envelope) = envelope_of(response).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope["error"], "Not Found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = seeded_router().await;
    let request = axum::http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}
