//! Request batch model
//!
//! A batch groups opaque item operations by target collection. The batch is
//! constructed once by the caller and validated before the first round-trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::BulkError;

/// One opaque operation against a collection.
///
/// Payloads are carried as raw JSON values; the driver never inspects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchItem {
    /// Read an item by key
    Get { key: String },
    /// Write an item
    Put { key: String, payload: Value },
    /// Delete an item by key
    ///
    /// Deleting a nonexistent key is a service-defined no-op, not an error.
    Delete { key: String },
}

impl BatchItem {
    pub fn get(key: impl Into<String>) -> Self {
        Self::Get { key: key.into() }
    }

    pub fn put(key: impl Into<String>, payload: Value) -> Self {
        Self::Put {
            key: key.into(),
            payload,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }

    /// The item key this operation targets
    pub fn key(&self) -> &str {
        match self {
            Self::Get { key } | Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// A named collection plus its ordered items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    /// Target collection name
    pub collection: String,
    /// Items submitted against the collection, in caller order
    pub items: Vec<BatchItem>,
}

impl CollectionRequest {
    pub fn new(collection: impl Into<String>, items: Vec<BatchItem>) -> Self {
        Self {
            collection: collection.into(),
            items,
        }
    }
}

/// An ordered set of collection requests submitted together.
///
/// Duplicate keys within a single collection are a caller error (the service
/// rejects them); this type does not detect them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBatch {
    requests: Vec<CollectionRequest>,
}

impl RequestBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collection and its items, preserving insertion order
    pub fn collection(mut self, name: impl Into<String>, items: Vec<BatchItem>) -> Self {
        self.requests.push(CollectionRequest::new(name, items));
        self
    }

    pub fn collections(&self) -> &[CollectionRequest] {
        &self.requests
    }

    /// Total number of items across all collections
    pub fn item_count(&self) -> usize {
        self.requests.iter().map(|r| r.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Reject empty or malformed batches before any network call
    pub fn validate(&self) -> Result<(), BulkError> {
        if self.requests.is_empty() {
            return Err(BulkError::invalid_batch(
                "batch must reference at least one collection",
            ));
        }
        for request in &self.requests {
            if request.collection.is_empty() {
                return Err(BulkError::invalid_batch("collection name must not be empty"));
            }
            if request.items.is_empty() {
                return Err(BulkError::invalid_batch(format!(
                    "collection '{}' has no items",
                    request.collection
                )));
            }
            for item in &request.items {
                if item.key().is_empty() {
                    return Err(BulkError::invalid_batch(format!(
                        "collection '{}' contains an item with an empty key",
                        request.collection
                    )));
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<CollectionRequest>> for RequestBatch {
    fn from(requests: Vec<CollectionRequest>) -> Self {
        Self { requests }
    }
}
