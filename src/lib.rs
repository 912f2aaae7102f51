//! # Movieboard
//!
//! A small HTTP API serving movies and comments from a MongoDB document store.
//!
//! ## Features
//!
//! - **Movie listing**: the first ten movies, without their full plot
//! - **Comments**: the ten most recent comments, and comment submission
//! - **Trusted-origin access control**: data routes only answer requests whose
//!   `Origin` (exact match) or `Referer` (prefix match) is the configured
//!   frontend origin
//! - **CORS**: data routes allow the trusted origin only, the status route
//!   allows any origin
//! - **Landing page**: a static page with its assets served from disk
//!
//! ## Architecture
//!
//! - [`store`] - Document store trait with MongoDB and in-memory backends
//! - [`catalog`] - Movie and comment operations, comment validation
//! - [`server`] - Axum routes, handlers and the trusted-origin guard
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use movieboard::{create_router, CatalogService, MemoryStore, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = CatalogService::new(MemoryStore::new());
//!     let router = create_router(catalog, RouterConfig::new("http://localhost:3000"));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use catalog::{
    CatalogService, CommentSubmission, NewComment, COMMENTS_COLLECTION, EXCLUDED_MOVIE_FIELD,
    MOVIES_COLLECTION, PAGE_LIMIT,
};
pub use config::{CheckConfig, Cli, Command, ServeConfig};
pub use error::{ApiError, StoreError};
pub use server::{
    create_router, origin_guard, AppState, ErrorResponse, RouterConfig, TrustedOrigin,
};
pub use store::{DocumentStore, FindQuery, MemoryStore, MongoStore, SortOrder};
