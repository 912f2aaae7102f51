//! Movie and comment operations on top of a document store.
//!
//! This is the only place that knows collection names, page sizes and the
//! shape of a stored comment.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, StoreError};
use crate::store::{document_to_json, DocumentStore, FindQuery, SortOrder};

/// Collection holding movie documents.
pub const MOVIES_COLLECTION: &str = "movies";

/// Collection holding comment documents.
pub const COMMENTS_COLLECTION: &str = "comments";

/// Maximum number of documents returned by a listing.
pub const PAGE_LIMIT: i64 = 10;

/// Movie field left out of listings.
pub const EXCLUDED_MOVIE_FIELD: &str = "fullplot";

// =============================================================================
// Comment Submission
// =============================================================================

/// Body of a comment submission as received from the client.
///
/// Every field is optional at the parsing stage so that absence can be
/// reported as a validation error rather than a malformed body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommentSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub text: Option<String>,
    pub movie_id: Option<String>,
}

/// A validated comment, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub text: String,
    pub movie_id: ObjectId,
    pub date: DateTime,
}

impl NewComment {
    /// Validate a submission and stamp it with `date`.
    ///
    /// Missing or empty fields yield `ApiError::MissingFields`. A `movie_id`
    /// that is not a valid ObjectId yields a fault carrying the parse error.
    pub fn from_submission(
        submission: CommentSubmission,
        date: DateTime,
    ) -> Result<Self, ApiError> {
        let CommentSubmission {
            name: Some(name),
            email: Some(email),
            text: Some(text),
            movie_id: Some(movie_id),
        } = submission
        else {
            return Err(ApiError::MissingFields);
        };

        if [&name, &email, &text, &movie_id].iter().any(|f| f.is_empty()) {
            return Err(ApiError::MissingFields);
        }

        let movie_id = ObjectId::parse_str(&movie_id)?;

        Ok(Self {
            name,
            email,
            text,
            movie_id,
            date,
        })
    }

    /// Stored representation of the comment.
    pub fn into_document(self) -> Document {
        doc! {
            "name": self.name,
            "email": self.email,
            "text": self.text,
            "movie_id": self.movie_id,
            "date": self.date,
        }
    }
}

// =============================================================================
// Catalog Service
// =============================================================================

/// Reads movies and comments and records new comments.
pub struct CatalogService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Build a service over a store that the caller keeps a handle to.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Up to `PAGE_LIMIT` movies without their full plot.
    pub async fn movies(&self) -> Result<Vec<Value>, StoreError> {
        let query = FindQuery::new()
            .exclude(EXCLUDED_MOVIE_FIELD)
            .limit(PAGE_LIMIT);
        let documents = self.store.find(MOVIES_COLLECTION, query).await?;
        debug!(count = documents.len(), "Fetched movies");
        Ok(documents.into_iter().map(document_to_json).collect())
    }

    /// Up to `PAGE_LIMIT` comments, newest first.
    pub async fn recent_comments(&self) -> Result<Vec<Value>, StoreError> {
        let query = FindQuery::new()
            .sort_by("date", SortOrder::Descending)
            .limit(PAGE_LIMIT);
        let documents = self.store.find(COMMENTS_COLLECTION, query).await?;
        debug!(count = documents.len(), "Fetched comments");
        Ok(documents.into_iter().map(document_to_json).collect())
    }

    /// Store a comment and return its identifier as a string.
    pub async fn add_comment(&self, comment: NewComment) -> Result<String, StoreError> {
        let inserted = self
            .store
            .insert_one(COMMENTS_COLLECTION, comment.into_document())
            .await?;

        let inserted_id = match inserted {
            Bson::ObjectId(id) => id.to_hex(),
            Bson::String(id) => id,
            other => other.to_string(),
        };
        debug!(inserted_id = %inserted_id, "Inserted comment");
        Ok(inserted_id)
    }
}
