//! Remote collection API trait
//!
//! The single abstraction the driver depends on. Implementations are injected
//! into [`PaginatedBulkOperation`](crate::core::operation::PaginatedBulkOperation)
//! so tests can substitute a scripted or in-memory collaborator.

use async_trait::async_trait;

use crate::core::types::{ApiError, PageRequest, ResponsePage};

/// A remote collection API that answers one batch request per round-trip.
///
/// # Contract
///
/// A conforming implementation signals remaining work in exactly one of two
/// styles per design instance:
///
/// - **Bulk mutation style**: a non-empty [`UnprocessedSet`] naming the
///   subset of the batch the service did not complete (throttling, capacity);
///   the driver resubmits exactly that subset.
/// - **Listing style**: a [`CursorToken`] pointing at the next page; the
///   driver follows it with a fresh request.
///
/// Returning both in one response violates the contract and aborts the
/// operation. Hard errors are returned as `Err`; the driver does not retry
/// them.
///
/// Implementations are treated as stateless capabilities: the driver never
/// mutates them and issues one request at a time.
///
/// [`UnprocessedSet`]: crate::core::types::UnprocessedSet
/// [`CursorToken`]: crate::core::types::CursorToken
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Perform one request/response round-trip
    async fn submit(&self, request: &PageRequest) -> Result<ResponsePage, ApiError>;
}
