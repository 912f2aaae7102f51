//! HTTP server layer for movieboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           HTTP Layer                            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │   origin    │  │        routes           │  │
//! │  │ (requests)  │  │   (guard)   │  │  (router, CORS, chain)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! │  ┌─────────────┐                                                │
//! │  │   landing   │                                                │
//! │  │ (HTML page) │                                                │
//! │  └─────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod landing;
pub mod origin;
pub mod routes;

pub use handlers::{
    add_comment_handler, comments_handler, index_handler, movies_handler, panic_response,
    status_handler, AppState, CommentCreatedResponse, CommentsResponse, ErrorResponse,
    MoviesResponse, StatusResponse, API_VERSION,
};
pub use origin::{origin_guard, TrustedOrigin};
pub use routes::{create_router, RouterConfig};
