//! Per-round wire model
//!
//! One round-trip submits a [`PageRequest`] and receives a [`ResponsePage`].
//! Requests are immutable: each round constructs a fresh request from the
//! previous response's cursor or unprocessed set instead of mutating a shared
//! request object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::batch::{CollectionRequest, RequestBatch};

/// Opaque, service-issued continuation marker.
///
/// Services either omit the token on the last page or return an empty string;
/// both mean the same thing here (see [`CursorToken::is_terminal`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty string is the defined "no more pages" sentinel
    pub fn is_terminal(&self) -> bool {
        self.0.is_empty()
    }
}

/// The subset of a submitted batch the service did not complete.
///
/// Produced per round-trip and consumed by building the next request from it;
/// never carried across rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnprocessedSet {
    entries: Vec<CollectionRequest>,
}

impl UnprocessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unprocessed subset for a collection, preserving order
    pub fn insert(&mut self, request: CollectionRequest) {
        self.entries.push(request);
    }

    pub fn entries(&self) -> &[CollectionRequest] {
        &self.entries
    }

    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|r| r.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Convert into the batch to resubmit on the next round
    pub fn into_batch(self) -> RequestBatch {
        RequestBatch::from(self.entries)
    }
}

impl From<Vec<CollectionRequest>> for UnprocessedSet {
    fn from(entries: Vec<CollectionRequest>) -> Self {
        Self { entries }
    }
}

/// One returned item or write acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    /// Collection the item belongs to
    pub collection: String,
    /// Item key
    pub key: String,
    /// Item body; absent for bare write acknowledgements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl PageItem {
    pub fn new(collection: impl Into<String>, key: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            body,
        }
    }
}

/// The immutable request value for a single round-trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The batch to submit this round
    pub batch: RequestBatch,
    /// Continuation cursor from the previous response, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorToken>,
}

impl PageRequest {
    /// First round: the caller's batch, no cursor
    pub fn new(batch: RequestBatch) -> Self {
        Self {
            batch,
            cursor: None,
        }
    }

    /// Next round of a paged listing: same batch, new cursor
    pub fn with_cursor(&self, cursor: CursorToken) -> Self {
        Self {
            batch: self.batch.clone(),
            cursor: Some(cursor),
        }
    }

    /// Next round after a partial completion: exactly the unprocessed subset
    pub fn resubmit(unprocessed: UnprocessedSet) -> Self {
        Self {
            batch: unprocessed.into_batch(),
            cursor: None,
        }
    }
}

/// The items and continuation state returned for one round-trip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePage {
    /// Items in service-defined order, preserved as received
    #[serde(default)]
    pub items: Vec<PageItem>,
    /// Subset of the submitted batch the service did not complete
    #[serde(default)]
    pub unprocessed: UnprocessedSet,
    /// Continuation cursor, when more pages remain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorToken>,
}

impl ResponsePage {
    pub fn new(items: Vec<PageItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_unprocessed(mut self, unprocessed: UnprocessedSet) -> Self {
        self.unprocessed = unprocessed;
        self
    }

    pub fn with_cursor(mut self, cursor: CursorToken) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// The cursor to follow, with the empty-string sentinel normalized away
    pub fn continuation(&self) -> Option<&CursorToken> {
        self.cursor.as_ref().filter(|c| !c.is_terminal())
    }
}
