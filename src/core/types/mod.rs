//! Core data model
//!
//! Request batches, per-round wire types, the accumulated result, and the
//! error surface.

pub mod batch;
pub mod errors;
pub mod page;
pub mod result;

pub use batch::{BatchItem, CollectionRequest, RequestBatch};
pub use errors::{ApiError, BulkError, BulkResult};
pub use page::{CursorToken, PageItem, PageRequest, ResponsePage, UnprocessedSet};
pub use result::AccumulatedResult;
