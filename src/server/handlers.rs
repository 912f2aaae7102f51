//! HTTP request handlers for the movieboard API.
//!
//! # Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /api/status` - Service status
//! - `GET /api/getMoviesData` - Movie listing (guarded)
//! - `GET /api/getCommentsData` - Latest comments (guarded)
//! - `POST /api/addComment` - Add a comment (guarded)

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use mongodb::bson::DateTime;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogService, CommentSubmission, NewComment};
use crate::error::ApiError;
use crate::store::DocumentStore;

use super::landing::generate_landing_html;
use super::origin::TrustedOrigin;

/// Version reported by the status endpoint.
pub const API_VERSION: &str = "1.0";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, handed to every handler.
pub struct AppState<S: DocumentStore> {
    /// Movie and comment operations
    pub catalog: Arc<CatalogService<S>>,

    /// Origin allowed to call guarded routes
    pub trusted_origin: TrustedOrigin,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(catalog: CatalogService<S>, trusted_origin: TrustedOrigin) -> Self {
        Self {
            catalog: Arc::new(catalog),
            trusted_origin,
        }
    }
}

impl<S: DocumentStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            trusted_origin: self.trusted_origin.clone(),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON body returned for every error.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Status endpoint response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

/// Movie listing response.
#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<Value>,
}

/// Comment listing response.
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Value>,
}

/// Response to a successful comment submission.
#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub message: String,
    pub inserted_id: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert `ApiError` to an HTTP response.
///
/// - `AccessDenied` -> 403
/// - `MissingFields` -> 400
/// - `Fault` -> 500, with the fault message returned as is
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        match &self {
            ApiError::Fault(_) => {
                error!(status = status.as_u16(), "Request failed: {}", message);
            }
            ApiError::MissingFields => {
                warn!(status = status.as_u16(), "Rejected request: {}", message);
            }
            ApiError::AccessDenied => {
                debug!(status = status.as_u16(), "Rejected request: {}", message);
            }
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Turn a panic escaping a handler into a `500` JSON response.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer` as the innermost layer
/// of guarded routes.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown error".to_string()
    };

    ApiError::Fault(message).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Serve the landing page.
///
/// `GET /`
pub async fn index_handler() -> Html<String> {
    Html(generate_landing_html(env!("CARGO_PKG_VERSION")))
}

/// Report that the service is up.
///
/// `GET /api/status`
///
/// ```json
/// { "status": "Service is running", "version": "1.0" }
/// ```
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Service is running".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// List up to ten movies, without their full plot.
///
/// `GET /api/getMoviesData`
///
/// # Response
///
/// - `200 OK`: `{"movies": [...]}`
/// - `403 Forbidden`: untrusted origin
/// - `500 Internal Server Error`: store failure
pub async fn movies_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<MoviesResponse>, ApiError> {
    let movies = state.catalog.movies().await?;
    Ok(Json(MoviesResponse { movies }))
}

/// List the ten most recent comments, newest first.
///
/// `GET /api/getCommentsData`
pub async fn comments_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let comments = state.catalog.recent_comments().await?;
    Ok(Json(CommentsResponse { comments }))
}

/// Add a comment.
///
/// `POST /api/addComment`
///
/// # Request
///
/// ```json
/// { "name": "...", "email": "...", "text": "...", "movie_id": "<ObjectId hex>" }
/// ```
///
/// # Response
///
/// - `201 Created`: `{"message": "Comment added successfully", "inserted_id": "..."}`
/// - `400 Bad Request`: a field is missing or empty
/// - `403 Forbidden`: untrusted origin
/// - `500 Internal Server Error`: malformed body, invalid `movie_id`, or store failure
pub async fn add_comment_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CommentSubmission>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(submission) = payload?;

    let comment = NewComment::from_submission(submission, DateTime::now())?;
    let inserted_id = state.catalog.add_comment(comment).await?;

    info!(inserted_id = %inserted_id, "Comment added");

    let body = CommentCreatedResponse {
        message: "Comment added successfully".to_string(),
        inserted_id,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

// =============================================================================
// Tests
// =============================================================================
