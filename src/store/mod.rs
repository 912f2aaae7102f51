//! Document store abstraction.
//!
//! The service only ever reads and appends documents. A store offers `find`
//! with an optional projection, sort and limit, plus `insert_one` and a
//! connectivity `ping`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                DocumentStore                 │
//! │   find(collection, FindQuery) -> [Document]  │
//! │   insert_one(collection, Document) -> id     │
//! ├──────────────────────┬───────────────────────┤
//! │      MongoStore      │      MemoryStore      │
//! │  (mongodb driver)    │  (tests, no database) │
//! └──────────────────────┴───────────────────────┘
//! ```

mod json;
mod memory;
mod mongo;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::StoreError;

pub use json::{bson_to_json, document_to_json};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Direction of a single-field sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Numeric direction as understood by MongoDB sort documents.
    pub fn as_i32(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// Options for a `find` call.
///
/// An empty query returns every document of the collection in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    /// Top-level fields removed from every returned document
    pub excluded_fields: Vec<String>,

    /// Optional single-field sort
    pub sort: Option<(String, SortOrder)>,

    /// Maximum number of documents to return
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a top-level field from the results.
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }

    /// Sort the results by a single field.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Cap the number of returned documents.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Exclusion projection document, e.g. `{ "fullplot": 0 }`.
    pub fn projection(&self) -> Option<Document> {
        if self.excluded_fields.is_empty() {
            return None;
        }

        let mut projection = Document::new();
        for field in &self.excluded_fields {
            projection.insert(field.clone(), 0);
        }
        Some(projection)
    }

    /// Sort document, e.g. `{ "date": -1 }`.
    pub fn sort_document(&self) -> Option<Document> {
        self.sort.as_ref().map(|(field, order)| {
            let mut sort = Document::new();
            sort.insert(field.clone(), order.as_i32());
            sort
        })
    }
}

/// A backend holding named collections of BSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read documents from a collection.
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, StoreError>;

    /// Append a document to a collection and return its `_id`.
    ///
    /// An `_id` is generated when the document does not carry one.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short human-readable description used in startup logs.
    fn describe(&self) -> String;
}
