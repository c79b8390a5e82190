//! Bounded retry for flaky UI interactions.
//!
//! The policy (attempt count, backoff, which errors retry) is decoupled from
//! the action being retried: callers hand over the driver and a closure, and
//! only [`DriverError::Transient`] failures are attempted again.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::DriverError;

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Initial backoff duration before first retry.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Whether to add jitter to backoff duration.
    pub add_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a retry config with the specified max retries.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Create a config with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Create a config for quick retries (smaller backoffs).
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }

    /// Calculate backoff duration for a given attempt.
    fn backoff_duration(&self, attempt: u32) -> Duration {
        let backoff =
            self.initial_backoff.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let backoff_ms = backoff.min(self.max_backoff.as_millis() as f64) as u64;

        let mut duration = Duration::from_millis(backoff_ms);

        if self.add_jitter {
            // Up to 25% jitter
            let jitter = (backoff_ms as f64 * 0.25 * rand_jitter()) as u64;
            duration += Duration::from_millis(jitter);
        }

        duration
    }
}

/// Simple pseudo-random jitter (0.0 to 1.0) without external dependencies.
fn rand_jitter() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

/// Determines whether a driver error is worth retrying.
pub fn is_retryable(error: &DriverError) -> bool {
    matches!(error, DriverError::Transient(_))
}

/// Execute a UI driver call with retry logic.
///
/// The driver is passed back into the closure on every attempt so the
/// borrow does not outlive a single try.
///
/// # Example
/// ```ignore
/// let result = retry_driver_call(&RetryConfig::default(), "select_customer", driver, |d| {
///     d.select_customer(customer)
/// })
/// .await;
/// ```
pub async fn retry_driver_call<C, T, F>(
    config: &RetryConfig,
    operation_name: &str,
    ctx: &mut C,
    mut f: F,
) -> Result<T, DriverError>
where
    C: ?Sized,
    F: for<'a> FnMut(&'a mut C) -> BoxFuture<'a, Result<T, DriverError>>,
{
    let mut attempt = 0;

    loop {
        match f(&mut *ctx).await {
            Ok(result) => {
                if attempt > 0 {
                    info!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        "ui interaction succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= config.max_retries {
                    warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        %error,
                        "ui interaction failed after max retries"
                    );
                    return Err(error);
                }

                if !is_retryable(&error) {
                    warn!(
                        operation = operation_name,
                        %error,
                        "ui interaction failed with non-retryable error"
                    );
                    return Err(error);
                }

                let backoff = config.backoff_duration(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    %error,
                    backoff_ms = backoff.as_millis(),
                    "ui interaction failed, retrying after backoff"
                );

                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
