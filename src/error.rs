use axum::extract::rejection::JsonRejection;
use mongodb::bson::oid;
use thiserror::Error;

/// Errors raised by a document store backend
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Error reported by the database driver (connection, query, write)
    #[error("{0}")]
    Driver(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Driver(err.to_string())
    }
}

/// Errors surfaced by the HTTP API.
///
/// Each variant maps to exactly one status code; see the `IntoResponse`
/// implementation in `server::handlers`.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request did not come from the trusted origin (HTTP 403)
    #[error("Access Denied")]
    AccessDenied,

    /// A required comment field was absent or empty (HTTP 400)
    #[error("Missing one or more required fields")]
    MissingFields,

    /// Any other failure while handling the request (HTTP 500).
    ///
    /// The message is returned to the caller verbatim.
    #[error("{0}")]
    Fault(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Fault(err.to_string())
    }
}

impl From<oid::Error> for ApiError {
    fn from(err: oid::Error) -> Self {
        ApiError::Fault(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Fault(rejection.body_text())
    }
}
