//! # pagebatch
//!
//! Cursor-paged bulk operation driver: submit a batch to a remote collection
//! API, follow continuation cursors, resubmit throttled subsets, and
//! accumulate every page's items in arrival order.
//!
//! ## Features
//!
//! - **Exhaustive pagination**: follows opaque continuation cursors until the
//!   service reports no more pages
//! - **Partial-failure retry**: resubmits exactly the unprocessed subset a
//!   bulk API hands back under capacity pressure
//! - **Bounded by construction**: a round budget plus exponential backoff
//!   with jitter replaces the retry-forever loop these APIs tempt you into
//! - **Injectable collaborator**: the remote API is a trait, so tests drive
//!   the loop with scripted or in-memory implementations
//! - **Cancellable**: accepts a `CancellationToken` checked between rounds
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pagebatch::{
//!     BatchItem, OperationConfig, PaginatedBulkOperation, RequestBatch,
//! };
//! # use pagebatch::{ApiError, CollectionApi, PageRequest, ResponsePage};
//! # struct DynamoStyleApi;
//! # #[async_trait::async_trait]
//! # impl CollectionApi for DynamoStyleApi {
//! #     async fn submit(&self, _: &PageRequest) -> Result<ResponsePage, ApiError> {
//! #         Ok(ResponsePage::default())
//! #     }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(DynamoStyleApi);
//! let operation = PaginatedBulkOperation::new(api, OperationConfig::default())?;
//!
//! let batch = RequestBatch::new()
//!     .collection("Forum", vec![BatchItem::get("forum-1")])
//!     .collection("Thread", vec![BatchItem::get("thread-1")]);
//!
//! let result = operation.execute(batch).await?;
//! for item in result.items() {
//!     println!("{}/{}", item.collection, item.key);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;

// Re-export main types
pub use config::{BackoffConfig, OperationConfig};
pub use core::operation::backoff::BackoffSchedule;
pub use core::operation::PaginatedBulkOperation;
pub use core::traits::CollectionApi;
pub use core::types::{
    AccumulatedResult, ApiError, BatchItem, BulkError, BulkResult, CollectionRequest, CursorToken,
    PageItem, PageRequest, RequestBatch, ResponsePage, UnprocessedSet,
};
