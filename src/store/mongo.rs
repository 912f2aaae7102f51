//! MongoDB-backed document store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Database};

use crate::error::StoreError;

use super::{DocumentStore, FindQuery};

/// `DocumentStore` over a single MongoDB database.
///
/// The driver keeps its own connection pool, so cloning is cheap and all
/// clones share connections.
///
/// # Example
///
/// ```ignore
/// use movieboard::store::MongoStore;
///
/// let store = MongoStore::connect("mongodb://localhost:27017", "sample_mflix").await?;
/// store.ping().await?;
/// ```
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Wrap an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Build a client from a connection string and select a database.
    ///
    /// This parses the URI and sets up the pool; no round-trip is made until
    /// the first operation (use `ping` to check connectivity).
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(client.database(database)))
    }

    /// Name of the selected database.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, StoreError> {
        let collection = self.database.collection::<Document>(collection);
        let mut find = collection.find(doc! {});

        if let Some(projection) = query.projection() {
            find = find.projection(projection);
        }
        if let Some(sort) = query.sort_document() {
            find = find.sort(sort);
        }
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(result.inserted_id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("mongodb (database '{}')", self.database_name())
    }
}
