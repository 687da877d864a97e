// ========================================
// tests/integration/flat_file_flow_tests.rs
// ========================================
//! The same HTTP flow over the flat-file store, including a restart
use axum::http::{Method, StatusCode};
use chatter_backend::store::UserStore;
use serde_json::json;
use tempfile::TempDir;

use crate::test_utils::{flat_file_app, login, register, send};

#[tokio::test]
async fn test_users_survive_restart() {
    let temp_dir = TempDir::new().unwrap();

    let id = {
        let (app, _state) = flat_file_app(temp_dir.path()).await;
        register(&app, "Ann", "ann@example.com", "secret1").await
    };

    let document = temp_dir.path().join("users").join(format!("{id}.json"));
    assert!(document.exists());
    let raw = std::fs::read_to_string(&document).unwrap();
    assert!(!raw.contains("secret1"));

    // A fresh store loads the document from disk
    let (app, state) = flat_file_app(temp_dir.path()).await;
    assert!(state
        .storage
        .find_by_email("ann@example.com")
        .await
        .unwrap()
        .is_some());

    let token = login(&app, "ann@example.com", "secret1").await;
    let (status, body) = send(&app, Method::GET, "/user/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, _) = send(
        &app,
        Method::POST,
        "/user/register",
        Some(json!({ "name": "Ann Again", "email": "ann@example.com", "password": "secret1" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_removes_document() {
    let temp_dir = TempDir::new().unwrap();
    let (app, _state) = flat_file_app(temp_dir.path()).await;

    let id = register(&app, "Ann", "ann@example.com", "secret1").await;
    let token = login(&app, "ann@example.com", "secret1").await;

    let (status, _) = send(&app, Method::DELETE, "/user/profile", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!temp_dir
        .path()
        .join("users")
        .join(format!("{id}.json"))
        .exists());
}

#[tokio::test]
async fn test_flat_file_pagination() {
    let temp_dir = TempDir::new().unwrap();
    let (app, _state) = flat_file_app(temp_dir.path()).await;
    for i in 0..5 {
        register(&app, &format!("User {i}"), &format!("user{i}@example.com"), "secret1").await;
    }

    let (_, first) = send(&app, Method::GET, "/user?limit=2&page=1", None, None).await;
    let (_, third) = send(&app, Method::GET, "/user?limit=2&page=3", None, None).await;
    assert_eq!(first["data"].as_array().unwrap().len(), 2);
    assert_eq!(third["data"].as_array().unwrap().len(), 1);
    assert!(first["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["id"] != third["data"][0]["id"]));
}
