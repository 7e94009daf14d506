//! Paginated bulk operation driver
//!
//! Repeatedly submits a batch request to a remote collection API until all
//! pages are retrieved and all items are processed, surfacing results even
//! under repeated throttling.

pub mod backoff;


use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::OperationConfig;
use crate::core::traits::CollectionApi;
use crate::core::types::{
    AccumulatedResult, BulkError, BulkResult, PageRequest, RequestBatch, ResponsePage,
};

use backoff::BackoffSchedule;

/// Drives a request/response cycle against a remote collection API.
///
/// Two continuation styles are handled by the same loop:
///
/// - a non-empty unprocessed set means the service completed only part of the
///   batch; the next round resubmits exactly that subset after a backoff
///   delay (the batch-write/batch-get capacity-retry idiom);
/// - a cursor means a paged listing has more pages; the next round follows it
///   with a freshly built request and no delay.
///
/// One request is in flight at a time, pages are consumed strictly in cursor
/// order, and the total number of round-trips is bounded by
/// [`OperationConfig::max_rounds`].
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use pagebatch::{BatchItem, OperationConfig, PaginatedBulkOperation, RequestBatch};
/// # use pagebatch::{ApiError, CollectionApi, PageRequest, ResponsePage};
/// # struct MyApi;
/// # #[async_trait::async_trait]
/// # impl CollectionApi for MyApi {
/// #     async fn submit(&self, _: &PageRequest) -> Result<ResponsePage, ApiError> {
/// #         Ok(ResponsePage::default())
/// #     }
/// # }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let api = Arc::new(MyApi);
/// let operation = PaginatedBulkOperation::new(api, OperationConfig::default())?;
///
/// let batch = RequestBatch::new()
///     .collection("Forum", vec![BatchItem::get("forum-1")]);
/// let result = operation.execute(batch).await?;
///
/// println!("{} item(s) in {} round-trip(s)", result.len(), result.rounds());
/// # Ok(())
/// # }
/// ```
pub struct PaginatedBulkOperation<A: CollectionApi + ?Sized> {
    api: Arc<A>,
    config: OperationConfig,
    cancel: CancellationToken,
}

impl<A: CollectionApi + ?Sized> PaginatedBulkOperation<A> {
    /// Create an operation over an injected collaborator.
    ///
    /// The collaborator is never constructed internally; passing it in keeps
    /// the seam open for test substitution.
    pub fn new(api: Arc<A>, config: OperationConfig) -> BulkResult<Self> {
        config.validate().map_err(BulkError::Configuration)?;
        Ok(Self {
            api,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Attach a cancellation token, checked between round-trips.
    ///
    /// A round already in flight is allowed to finish; its items are
    /// discarded with the rest of the accumulator when cancellation is
    /// observed.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &OperationConfig {
        &self.config
    }

    /// Execute the operation to completion.
    ///
    /// On success every item in `batch` has either appeared in the result or
    /// been dropped by the service as a documented no-op (delete of a
    /// nonexistent key). A hard error from the collaborator aborts the whole
    /// operation; items gathered before the failure are discarded.
    pub async fn execute(&self, batch: RequestBatch) -> BulkResult<AccumulatedResult> {
        batch.validate()?;

        let mut request = PageRequest::new(batch);
        let mut result = AccumulatedResult::new();
        let mut backoff = BackoffSchedule::new(self.config.backoff.clone());
        let mut rounds: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                warn!(rounds, "bulk operation cancelled");
                return Err(BulkError::Cancelled { rounds });
            }
            if rounds >= self.config.max_rounds {
                // A cursor-style request carries the listing query, not
                // outstanding items; only a resubmission has pending work
                let pending = if request.cursor.is_some() {
                    0
                } else {
                    request.batch.item_count()
                };
                error!(rounds, pending, "round budget exhausted");
                return Err(BulkError::RetriesExhausted { rounds, pending });
            }

            let page = match self.api.submit(&request).await {
                Ok(page) => page,
                Err(source) => {
                    error!(rounds, error = %source, "round-trip failed, aborting");
                    return Err(BulkError::transport(rounds, source));
                }
            };
            rounds += 1;
            debug!(
                rounds,
                items = page.items.len(),
                unprocessed = page.unprocessed.item_count(),
                has_cursor = page.continuation().is_some(),
                "round-trip completed"
            );

            let ResponsePage {
                items,
                unprocessed,
                cursor,
            } = page;
            result.extend(items);

            // Normalize the empty-string sentinel the same way continuation() does
            let cursor = cursor.filter(|c| !c.is_terminal());
            match (unprocessed.is_empty(), cursor) {
                (true, None) => {
                    result.set_rounds(rounds);
                    debug!(rounds, items = result.len(), "bulk operation complete");
                    return Ok(result);
                }
                (false, Some(_)) => {
                    error!(rounds, "response carried both an unprocessed set and a cursor");
                    return Err(BulkError::ConflictingContinuation { rounds });
                }
                (false, None) => {
                    warn!(
                        rounds,
                        pending = unprocessed.item_count(),
                        "service left items unprocessed, resubmitting subset"
                    );
                    backoff.wait().await;
                    request = PageRequest::resubmit(unprocessed);
                }
                (true, Some(token)) => {
                    request = request.with_cursor(token);
                    backoff.reset();
                }
            }
        }
    }
}
