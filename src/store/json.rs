//! Rendering of stored documents as API JSON.
//!
//! ObjectIds become their hex string and datetimes become RFC 3339 strings,
//! at any depth. Everything else uses relaxed extended JSON.

use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Render a single BSON value.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(date) => Value::String(
            date.try_to_rfc3339_string()
                .unwrap_or_else(|_| date.timestamp_millis().to_string()),
        ),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Render a document as a JSON object.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}
