// ===================================
// tests/integration/profile_tests.rs
// ===================================
//! Bearer-token protected profile routes
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::test_utils::{login, memory_app, register, send};

#[tokio::test]
async fn test_profile_requires_token() {
    let (app, _state) = memory_app();

    let (status, body) = send(&app, Method::GET, "/user/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    let (status, _) = send(&app, Method::GET, "/user/profile", None, Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_returns_current_user() {
    let (app, _state) = memory_app();
    let id = register(&app, "Ann", "ann@example.com", "secret1").await;
    register(&app, "Bob", "bob@example.com", "secret2").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, body) = send(&app, Method::GET, "/user/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["name"], "Ann");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_update_profile() {
    let (app, _state) = memory_app();
    register(&app, "Ann", "ann@example.com", "secret1").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/user/profile",
        Some(json!({ "name": "Annie", "email": "annie@example.com", "password": "newsecret" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "Annie");
    assert_eq!(body["data"]["email"], "annie@example.com");

    // Old credentials stop working, new ones work
    let (status, _) = send(
        &app,
        Method::POST,
        "/user/login",
        Some(json!({ "email": "ann@example.com", "password": "secret1" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    login(&app, "annie@example.com", "newsecret").await;
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email() {
    let (app, _state) = memory_app();
    register(&app, "Ann", "ann@example.com", "secret1").await;
    register(&app, "Bob", "bob@example.com", "secret2").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/user/profile",
        Some(json!({ "name": "Annie", "email": "bob@example.com" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Nothing was applied
    let (_, body) = send(&app, Method::GET, "/user/profile", None, Some(&token)).await;
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["email"], "ann@example.com");
}

#[tokio::test]
async fn test_update_profile_requires_a_field() {
    let (app, _state) = memory_app();
    register(&app, "Ann", "ann@example.com", "secret1").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, body) = send(&app, Method::PATCH, "/user/profile", Some(json!({})), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
}

#[tokio::test]
async fn test_delete_profile() {
    let (app, state) = memory_app();
    register(&app, "Ann", "ann@example.com", "secret1").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, body) = send(&app, Method::DELETE, "/user/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(state.storage.is_empty());

    // The token is still well-formed but its user is gone
    let (status, _) = send(&app, Method::GET, "/user/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The email can be registered again
    register(&app, "Ann", "ann@example.com", "secret1").await;
}
