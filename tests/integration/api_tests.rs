//! API integration tests for listings, status, landing page and errors.
//!
//! Tests verify:
//! - Movie listing is capped at ten entries and never contains `fullplot`
//! - Identifiers and dates are rendered as strings
//! - Comment listing is ordered newest first
//! - Store failures surface as `500 {"error": <message>}`
//! - Status and landing page responses

use std::sync::Arc;

use axum::http::{header, StatusCode};
use tower::ServiceExt;

use movieboard::store::MemoryStore;
use movieboard::{create_router, CatalogService};

use super::test_utils::{
    bare_get, body_json, body_text, comment_dates, router_with_store, seeded_router, test_config,
    trusted_get, FailingStore, PanickingStore, MOVIE_ID,
};

// =============================================================================
// Movies
// =============================================================================

#[tokio::test]
async fn test_movies_capped_at_ten() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 10);
}

#[tokio::test]
async fn test_movies_exclude_fullplot() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();
    let body = body_json(response).await;

    for movie in body["movies"].as_array().unwrap() {
        assert!(movie.get("fullplot").is_none());
        assert!(movie.get("plot").is_some());
    }
}

#[tokio::test]
async fn test_movies_render_ids_and_dates_as_strings() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let movies = body["movies"].as_array().unwrap();

    assert_eq!(movies[0]["_id"], MOVIE_ID);
    for movie in movies {
        assert!(movie["_id"].is_string());
        assert!(movie["released"].is_string());
        assert_eq!(movie["imdb"]["votes"], 1189);
    }
}

#[tokio::test]
async fn test_movies_fewer_than_limit() {
    let store = MemoryStore::new().with_documents("movies", super::test_utils::movie_fixtures(3));
    let router = create_router(CatalogService::new(store), test_config());

    let response = router
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["movies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_movies_empty_collection() {
    let router = router_with_store(Arc::new(MemoryStore::new()));
    let response = router
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "movies": [] }));
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn test_comments_newest_first() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/getCommentsData"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 10);

    assert_eq!(comments[0]["text"], "Comment number 11");

    let dates = comment_dates(&body);
    assert_eq!(dates.len(), 10);
    for pair in dates.windows(2) {
        assert!(pair[0] >= pair[1], "{} before {}", pair[0], pair[1]);
    }
}

#[tokio::test]
async fn test_comments_render_ids_as_strings() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/getCommentsData"))
        .await
        .unwrap();
    let body = body_json(response).await;

    for comment in body["comments"].as_array().unwrap() {
        assert!(comment["_id"].is_string());
        assert_eq!(comment["movie_id"], MOVIE_ID);
    }
}

// =============================================================================
// Store Failures
// =============================================================================

#[tokio::test]
async fn test_store_failure_on_movies() {
    let router = router_with_store(Arc::new(FailingStore::new("connection refused")));
    let response = router
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "connection refused" })
    );
}

#[tokio::test]
async fn test_store_failure_on_comments() {
    let router = router_with_store(Arc::new(FailingStore::new("server selection timeout")));
    let response = router
        .oneshot(trusted_get("/api/getCommentsData"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "server selection timeout");
}

#[tokio::test]
async fn test_guard_runs_before_store() {
    // Even a broken store is never reached by untrusted callers
    let router = router_with_store(Arc::new(FailingStore::new("boom")));
    let response = router
        .oneshot(bare_get("/api/getMoviesData"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_handler_panic_becomes_fault() {
    let router = router_with_store(Arc::new(PanickingStore::new("store exploded")));
    let response = router
        .oneshot(trusted_get("/api/getMoviesData"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "store exploded" })
    );
}

#[tokio::test]
async fn test_guard_runs_before_panicking_handler() {
    let router = router_with_store(Arc::new(PanickingStore::new("store exploded")));
    let response = router
        .oneshot(bare_get("/api/getMoviesData"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Access Denied");
}

#[tokio::test]
async fn test_panic_on_insert_becomes_fault() {
    let router = router_with_store(Arc::new(PanickingStore::new("insert exploded")));
    let response = router
        .oneshot(super::test_utils::trusted_comment_post(
            super::test_utils::valid_comment(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "insert exploded");
}

// =============================================================================
// Status and Landing Page
// =============================================================================

#[tokio::test]
async fn test_status_body() {
    let response = seeded_router()
        .oneshot(bare_get("/api/status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["status"], "Service is running");
}

#[tokio::test]
async fn test_status_does_not_need_store() {
    let router = router_with_store(Arc::new(FailingStore::new("down")));
    let response = router.oneshot(bare_get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_landing_page() {
    let response = seeded_router().oneshot(bare_get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains(r#"<canvas id="game">"#));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = seeded_router()
        .oneshot(trusted_get("/api/doesNotExist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_assets_served_from_dir() {
    let dir = std::env::temp_dir().join(format!("movieboard-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("game.js"), "console.log('ready');").unwrap();

    let store = MemoryStore::new();
    let router = create_router(
        CatalogService::new(store),
        test_config().with_static_dir(&dir),
    );

    let response = router.oneshot(bare_get("/static/game.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "console.log('ready');");

    std::fs::remove_dir_all(&dir).ok();
}
