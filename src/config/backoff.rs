//! Backoff configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Exponential backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Initial delay (milliseconds)
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Maximum delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Backoff multiplier applied after each delay
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Add random jitter
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            jitter: true,
        }
    }
}

impl BackoffConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(format!(
                "max_delay_ms ({}) must be >= initial_delay_ms ({})",
                self.max_delay_ms, self.initial_delay_ms
            ));
        }
        if self.multiplier < 1.0 {
            return Err(format!("multiplier ({}) must be >= 1.0", self.multiplier));
        }
        Ok(())
    }
}
