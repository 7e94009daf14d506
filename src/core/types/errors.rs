//! Error types for bulk operations
//!
//! A hard transport/service error on any round-trip aborts the whole
//! operation and discards the partial results gathered so far. Error
//! variants carry the number of completed round-trips so callers can see how
//! far the operation got without receiving partial data.

/// Result alias for bulk operations
pub type BulkResult<T> = std::result::Result<T, BulkError>;

/// Boxed error returned by a [`CollectionApi`](crate::core::traits::CollectionApi)
/// implementation
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by [`PaginatedBulkOperation`](crate::core::operation::PaginatedBulkOperation)
#[derive(Debug, thiserror::Error)]
pub enum BulkError {
    /// Empty or malformed initial batch, rejected before any network call
    #[error("invalid batch: {0}")]
    InvalidBatch(String),

    /// Rejected operation configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Hard error from the remote collaborator; the operation aborts and
    /// partial results are discarded
    #[error("transport error after {rounds} round-trip(s): {message}")]
    Transport {
        rounds: u32,
        message: String,
        #[source]
        source: Option<ApiError>,
    },

    /// Round budget exceeded with work still outstanding
    #[error("retries exhausted after {rounds} round-trip(s), {pending} item(s) still pending")]
    RetriesExhausted { rounds: u32, pending: usize },

    /// The response carried both an unprocessed set and a cursor, which the
    /// collaborator contract forbids
    #[error(
        "conflicting continuation after {rounds} round-trip(s): response carried both an unprocessed set and a cursor"
    )]
    ConflictingContinuation { rounds: u32 },

    /// Cancellation token fired between rounds
    #[error("operation cancelled after {rounds} round-trip(s)")]
    Cancelled { rounds: u32 },
}

impl BulkError {
    pub fn invalid_batch(message: impl Into<String>) -> Self {
        Self::InvalidBatch(message.into())
    }

    pub fn transport(rounds: u32, source: ApiError) -> Self {
        Self::Transport {
            rounds,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Whether re-running the whole operation could reasonably succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::RetriesExhausted { .. } => true,
            Self::InvalidBatch(_)
            | Self::Configuration(_)
            | Self::ConflictingContinuation { .. }
            | Self::Cancelled { .. } => false,
        }
    }

    /// Number of round-trips completed before the failure, when known
    pub fn rounds(&self) -> Option<u32> {
        match self {
            Self::InvalidBatch(_) | Self::Configuration(_) => None,
            Self::Transport { rounds, .. }
            | Self::RetriesExhausted { rounds, .. }
            | Self::ConflictingContinuation { rounds }
            | Self::Cancelled { rounds } => Some(*rounds),
        }
    }
}
