//! Operation configuration

use serde::{Deserialize, Serialize};

use super::backoff::BackoffConfig;
use super::defaults::*;

/// Configuration for a [`PaginatedBulkOperation`](crate::core::operation::PaginatedBulkOperation).
///
/// `max_rounds` bounds the *total* number of round-trips, retries and cursor
/// pages alike. The observed upstream samples loop without a bound; that is a
/// liveness bug, not a contract, so the bound here is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Maximum round-trips before the operation fails with `RetriesExhausted`
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Backoff applied before resubmitting an unprocessed subset
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Default for OperationConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            backoff: BackoffConfig::default(),
        }
    }
}

impl OperationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be at least 1".to_string());
        }
        self.backoff.validate()
    }
}
