//! Comment submission integration tests.
//!
//! Tests verify:
//! - Valid submissions return 201 with an inserted id and become visible
//! - Missing or empty fields return 400 and insert nothing
//! - Invalid movie ids and malformed bodies surface as 500 with a message

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use movieboard::store::MemoryStore;

use super::test_utils::{
    body_json, router_with_store, trusted_comment_post, trusted_get, valid_comment, FailingStore,
    MOVIE_ID, TRUSTED_ORIGIN,
};

const MISSING_FIELDS: &str = "Missing one or more required fields";

// =============================================================================
// Successful Submission
// =============================================================================

#[tokio::test]
async fn test_add_comment_created() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let response = router
        .oneshot(trusted_comment_post(valid_comment()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let inserted_id = body["inserted_id"].as_str().unwrap();
    assert_eq!(inserted_id.len(), 24);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert_eq!(store.count("comments").await, 1);
}

#[tokio::test]
async fn test_added_comment_is_listed() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let response = router
        .clone()
        .oneshot(trusted_comment_post(valid_comment()))
        .await
        .unwrap();
    let inserted_id = body_json(response).await["inserted_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .oneshot(trusted_get("/api/getCommentsData"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let comments = body["comments"].as_array().unwrap();

    let comment = comments
        .iter()
        .find(|c| c["_id"] == inserted_id.as_str())
        .expect("inserted comment should be listed");
    assert_eq!(comment["text"], "Winter is coming to the cinema.");
    assert_eq!(comment["movie_id"], MOVIE_ID);
    assert!(comment["date"].is_string());
}

#[tokio::test]
async fn test_new_comment_listed_before_older_ones() {
    let store = Arc::new(super::test_utils::seeded_store());
    let router = router_with_store(Arc::clone(&store));

    router
        .clone()
        .oneshot(trusted_comment_post(valid_comment()))
        .await
        .unwrap();

    let response = router
        .oneshot(trusted_get("/api/getCommentsData"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let comments = body["comments"].as_array().unwrap();

    // Fixture comments are dated 2017; the new one is stamped now
    assert_eq!(comments.len(), 10);
    assert_eq!(comments[0]["text"], "Winter is coming to the cinema.");
}

#[tokio::test]
async fn test_referer_allows_submission() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addComment")
        .header(header::REFERER, format!("{}/movies/{}", TRUSTED_ORIGIN, MOVIE_ID))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(valid_comment().to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_field_rejected_without_insert() {
    for field in ["name", "email", "text", "movie_id"] {
        let store = Arc::new(MemoryStore::new());
        let router = router_with_store(Arc::clone(&store));

        let mut body = valid_comment();
        body.as_object_mut().unwrap().remove(field);

        let response = router.oneshot(trusted_comment_post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": MISSING_FIELDS })
        );
        assert_eq!(store.count("comments").await, 0);
    }
}

#[tokio::test]
async fn test_empty_field_rejected_without_insert() {
    for field in ["name", "email", "text", "movie_id"] {
        let store = Arc::new(MemoryStore::new());
        let router = router_with_store(Arc::clone(&store));

        let mut body = valid_comment();
        body[field] = serde_json::json!("");

        let response = router.oneshot(trusted_comment_post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "empty {}", field);
        assert_eq!(body_json(response).await["error"], MISSING_FIELDS);
        assert_eq!(store.count("comments").await, 0);
    }
}

#[tokio::test]
async fn test_null_field_rejected() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let mut body = valid_comment();
    body["email"] = serde_json::Value::Null;

    let response = router.oneshot(trusted_comment_post(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.count("comments").await, 0);
}

#[tokio::test]
async fn test_empty_object_rejected() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let response = router
        .oneshot(trusted_comment_post(serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Faults
// =============================================================================

#[tokio::test]
async fn test_invalid_movie_id_is_fault() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let mut body = valid_comment();
    body["movie_id"] = serde_json::json!("not-an-object-id");

    let response = router.oneshot(trusted_comment_post(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
    assert_eq!(store.count("comments").await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_fault() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addComment")
        .header(header::ORIGIN, TRUSTED_ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_is_fault() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with_store(Arc::clone(&store));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addComment")
        .header(header::ORIGIN, TRUSTED_ORIGIN)
        .body(Body::from(valid_comment().to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.count("comments").await, 0);
}

#[tokio::test]
async fn test_store_failure_on_insert() {
    let router = router_with_store(Arc::new(FailingStore::new("write concern error")));

    let response = router
        .oneshot(trusted_comment_post(valid_comment()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "write concern error" })
    );
}

#[tokio::test]
async fn test_get_on_add_comment_not_allowed() {
    let router = router_with_store(Arc::new(MemoryStore::new()));
    let response = router
        .oneshot(trusted_get("/api/addComment"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
