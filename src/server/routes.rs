//! Router configuration for movieboard.
//!
//! This module defines the HTTP routes and composes the access-control chain
//! around the guarded ones.
//!
//! # Route Structure
//!
//! ```text
//! /                          - Landing page (public, no CORS)
//! /static/*                  - Landing page assets (public, no CORS)
//! /api/status                - Status (public, CORS: any origin)
//! /api/getMoviesData         - Movies (guarded, CORS: trusted origin)
//! /api/getCommentsData       - Comments (guarded, CORS: trusted origin)
//! /api/addComment            - Add comment (guarded, CORS: trusted origin)
//! ```
//!
//! # Guarded Chain
//!
//! Guarded routes are wrapped, outermost first, by:
//!
//! 1. CORS restricted to the trusted origin
//! 2. The trusted-origin guard (403 on mismatch)
//! 3. A panic catcher translating escaped faults to `500 {"error": ...}`
//!
//! Handler errors are `ApiError` values and become JSON responses through
//! their `IntoResponse` implementation.
//!
//! # Example
//!
//! ```ignore
//! use movieboard::catalog::CatalogService;
//! use movieboard::server::routes::{create_router, RouterConfig};
//! use movieboard::store::MongoStore;
//!
//! let store = MongoStore::connect("mongodb://localhost:27017", "sample_mflix").await?;
//! let config = RouterConfig::new("https://movies.example.com").with_static_dir("static");
//! let router = create_router(CatalogService::new(store), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{
    add_comment_handler, comments_handler, index_handler, movies_handler, panic_response,
    status_handler, AppState,
};
use super::landing::STATIC_PREFIX;
use super::origin::{origin_guard, TrustedOrigin};
use crate::catalog::CatalogService;
use crate::store::DocumentStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Origin allowed to call guarded routes
    pub trusted_origin: TrustedOrigin,

    /// Directory served under `/static` (None = no static assets)
    pub static_dir: Option<PathBuf>,

    /// CORS preflight max-age in seconds
    pub cors_max_age: u64,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration for the given trusted origin.
    ///
    /// By default:
    /// - No static directory
    /// - CORS preflight responses are cached for 1 hour
    /// - Tracing is enabled
    pub fn new(trusted_origin: impl Into<String>) -> Self {
        Self {
            trusted_origin: TrustedOrigin::new(trusted_origin),
            static_dir: None,
            cors_max_age: 3600,
            enable_tracing: true,
        }
    }

    /// Serve files from `dir` under `/static`.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the CORS preflight max-age in seconds.
    pub fn with_cors_max_age(mut self, seconds: u64) -> Self {
        self.cors_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `catalog` - Movie and comment operations over the document store
/// * `config` - Router configuration
pub fn create_router<S>(catalog: CatalogService<S>, config: RouterConfig) -> Router
where
    S: DocumentStore + 'static,
{
    let app_state = AppState::new(catalog, config.trusted_origin.clone());

    let router = Router::new()
        .merge(build_guarded_routes(app_state, &config))
        .merge(build_status_routes(&config))
        .merge(build_public_routes(&config));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Routes behind the trusted-origin chain.
fn build_guarded_routes<S>(app_state: AppState<S>, config: &RouterConfig) -> Router
where
    S: DocumentStore + 'static,
{
    let trusted = app_state.trusted_origin.clone();

    // CORS wraps every method so it can answer preflights itself; the guard
    // and panic catcher only run for matched routes
    Router::new()
        .route("/api/getMoviesData", get(movies_handler::<S>))
        .route("/api/getCommentsData", get(comments_handler::<S>))
        .route("/api/addComment", post(add_comment_handler::<S>))
        .with_state(app_state)
        .route_layer(CatchPanicLayer::custom(panic_response))
        .route_layer(middleware::from_fn_with_state(trusted, origin_guard))
        .layer(build_trusted_cors_layer(config))
}

/// Status route, readable from any origin.
fn build_status_routes(config: &RouterConfig) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .layer(build_any_origin_cors_layer(config))
}

/// Landing page and its assets.
fn build_public_routes(config: &RouterConfig) -> Router {
    let router = Router::new().route("/", get(index_handler));

    match &config.static_dir {
        Some(dir) => router.nest_service(STATIC_PREFIX, ServeDir::new(dir)),
        None => router,
    }
}

/// CORS layer admitting only the trusted origin.
fn build_trusted_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age));

    match config.trusted_origin.as_str().parse::<HeaderValue>() {
        // Listed origins are only echoed back to requests that match them
        Ok(origin) => cors.allow_origin([origin]),
        Err(_) => {
            // No allowed origin: browsers will refuse cross-origin calls
            warn!(
                origin = config.trusted_origin.as_str(),
                "Trusted origin is not a valid header value; CORS will deny all origins"
            );
            cors
        }
    }
}

/// CORS layer admitting any origin.
fn build_any_origin_cors_layer(config: &RouterConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .max_age(Duration::from_secs(config.cors_max_age))
}

// =============================================================================
// Tests
// =============================================================================
