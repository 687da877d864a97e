// ========================================
// tests/integration/user_listing_tests.rs
// ========================================
//! `GET /user` pagination
use std::collections::HashSet;

use axum::{http::Method, http::StatusCode, Router};
use chatter_backend::store::{NewUser, UserStore};
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::test_utils::{memory_app, register, send};

async fn seed(app: &Router, count: usize) {
    for i in 0..count {
        register(app, &format!("User {i:02}"), &format!("user{i}@example.com"), "secret1").await;
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .map(|u| u["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let (app, _state) = memory_app();
    seed(&app, 7).await;

    let mut seen = HashSet::new();
    let mut sizes = Vec::new();
    for page in 1..=4 {
        let (status, body) = send(&app, Method::GET, &format!("/user?limit=3&page={page}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Retrieved users successfully");
        let page_ids = ids(&body);
        sizes.push(page_ids.len());
        for id in page_ids {
            assert!(seen.insert(id), "user listed twice");
        }
    }

    assert_eq!(sizes, vec![3, 3, 1, 0]);
    assert_eq!(seen.len(), 7);
}

#[tokio::test]
async fn test_listing_is_ordered_by_creation_time() {
    let (app, state) = memory_app();
    let base = Utc::now();

    // Inserted out of order; listing follows created_at, not insertion
    for (name, offset) in [("Third", 30), ("First", 10), ("Fourth", 40), ("Second", 20)] {
        state
            .storage
            .create(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "hash".to_string(),
                role: "USER".to_string(),
                created_at: base + Duration::seconds(offset),
            })
            .await
            .unwrap();
    }

    let (_, body) = send(&app, Method::GET, "/user?limit=10", None, None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third", "Fourth"]);
}

#[tokio::test]
async fn test_listing_never_exposes_password_hash() {
    let (app, _state) = memory_app();
    seed(&app, 1).await;

    let (_, body) = send(&app, Method::GET, "/user?limit=1", None, None).await;
    let user = &body["data"][0];
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert_eq!(user["role"], "USER");
    assert_eq!(user["email"], "user0@example.com");
}

#[tokio::test]
async fn test_page_defaults_to_first() {
    let (app, _state) = memory_app();
    seed(&app, 6).await;

    let (_, first) = send(&app, Method::GET, "/user?limit=5&page=1", None, None).await;
    let (status, missing) = send(&app, Method::GET, "/user?limit=5", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&missing), ids(&first));

    let (status, garbage) = send(&app, Method::GET, "/user?limit=5&page=abc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&garbage), ids(&first));
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let (app, _state) = memory_app();

    for uri in [
        "/user",
        "/user?limit=abc",
        "/user?limit=0",
        "/user?limit=-1",
        "/user?limit=101",
        "/user?limit=5&page=0",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Invalid query parameter", "{uri}");
        assert!(body["data"].is_null());
    }
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let (app, _state) = memory_app();

    let (status, body) = send(&app, Method::GET, "/user?limit=10", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}
