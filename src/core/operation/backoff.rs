//! Exponential backoff between unprocessed-set resubmissions

use std::time::Duration;

use tracing::debug;

use crate::config::BackoffConfig;

/// Stateful backoff schedule.
///
/// The delay starts at the configured initial value, is multiplied after each
/// wait, and is capped at the configured maximum. A clean page (no
/// unprocessed items) resets the schedule, so backoff only compounds under
/// sustained throttling.
#[derive(Debug)]
pub struct BackoffSchedule {
    config: BackoffConfig,
    delay: Duration,
}

impl BackoffSchedule {
    pub fn new(config: BackoffConfig) -> Self {
        let delay = config.initial_delay();
        Self { config, delay }
    }

    /// Sleep for the current (optionally jittered) delay, then advance it
    pub async fn wait(&mut self) {
        let actual_delay = if self.config.jitter {
            // jitter_factor 0.1 centered on zero gives a ±5% spread
            let jitter_factor = 0.1;
            let jitter =
                self.delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
            Duration::from_millis((self.delay.as_millis() as f64 + jitter) as u64)
        } else {
            self.delay
        };

        debug!(delay_ms = actual_delay.as_millis() as u64, "backing off before resubmission");
        tokio::time::sleep(actual_delay).await;

        self.delay = std::cmp::min(
            Duration::from_millis(
                (self.delay.as_millis() as f64 * self.config.multiplier) as u64,
            ),
            self.config.max_delay(),
        );
    }

    /// Reset to the initial delay after a clean page
    pub fn reset(&mut self) {
        self.delay = self.config.initial_delay();
    }

    /// The delay the next `wait` would apply, before jitter
    pub fn current_delay(&self) -> Duration {
        self.delay
    }
}
