//! Trusted-origin guard.
//!
//! Requests to guarded routes must come from the single configured frontend
//! origin. A request is trusted when either:
//!
//! - its `Origin` header equals the trusted origin exactly, or
//! - its `Referer` header starts with the trusted origin.
//!
//! ```text
//! trusted origin:  https://movies.example.com
//!
//! Origin:  https://movies.example.com           -> allowed
//! Referer: https://movies.example.com/comments  -> allowed
//! Origin:  https://movies.example.com/          -> denied (no normalization)
//! Origin:  HTTPS://MOVIES.EXAMPLE.COM           -> denied (case-sensitive)
//! (no Origin, no Referer)                       -> denied
//! ```
//!
//! Comparison is literal: no case folding, no trailing-slash handling. Note
//! that the referer check is a plain prefix match, so a trusted origin of
//! `https://a.com` also admits a referer of `https://a.com.evil.net/`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::error::ApiError;

/// The single origin allowed to call guarded routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedOrigin {
    origin: String,
}

impl TrustedOrigin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// The configured origin string.
    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Decide whether a request with these headers is trusted.
    pub fn permits(&self, origin: Option<&str>, referer: Option<&str>) -> bool {
        origin == Some(self.origin.as_str())
            || referer.is_some_and(|referer| referer.starts_with(&self.origin))
    }

    /// Same as [`permits`](Self::permits), reading the headers from a map.
    ///
    /// Header values that are not visible ASCII count as absent.
    pub fn permits_headers(&self, headers: &HeaderMap) -> bool {
        self.permits(
            header_str(headers, header::ORIGIN),
            header_str(headers, header::REFERER),
        )
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Axum middleware rejecting requests not coming from the trusted origin.
///
/// Untrusted requests get `403` with `{"error": "Access Denied"}`; trusted
/// requests reach the inner service untouched.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use movieboard::server::origin::{origin_guard, TrustedOrigin};
///
/// let trusted = TrustedOrigin::new("https://movies.example.com");
/// let app = Router::new()
///     .route("/api/getMoviesData", get(movies_handler))
///     .layer(middleware::from_fn_with_state(trusted, origin_guard));
/// ```
pub async fn origin_guard(
    State(trusted): State<TrustedOrigin>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers();

    if !trusted.permits_headers(headers) {
        warn!(
            method = %request.method(),
            path = request.uri().path(),
            origin = ?header_str(headers, header::ORIGIN),
            referer = ?header_str(headers, header::REFERER),
            "Rejected request from untrusted origin"
        );
        return Err(ApiError::AccessDenied);
    }

    debug!(path = request.uri().path(), "Trusted origin accepted");
    Ok(next.run(request).await)
}
