use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one). Zero is treated as one.
    pub max_attempts: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles the delay each time)
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: generation calls (3 attempts).
    /// Delays: 1s, 2s = 3s total wait time
    pub fn generation() -> Self {
        Self::new(3, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5))
            .with_backoff_multiplier(2.0)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Calculate the delay for a given attempt number (0-indexed)
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::generation()
    }
}

/// Execute an async operation with retries, using a predicate to determine if retry is appropriate
///
/// Errors rejected by `should_retry` are returned immediately. Otherwise the
/// last error is returned once every attempt has failed.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.attempts();
    let mut attempt = 0;

    loop {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                max_attempts,
                delay
            );
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        if !should_retry(&error) {
            debug!(
                "{}: Error is not retryable, failing immediately: {}",
                operation_name, error
            );
            return Err(error);
        }

        let remaining = max_attempts - attempt - 1;
        if remaining == 0 {
            warn!(
                "{}: All {} attempts failed. Last error: {}",
                operation_name, max_attempts, error
            );
            return Err(error);
        }

        warn!(
            "{}: Attempt {}/{} failed ({}), {} retries remaining",
            operation_name,
            attempt + 1,
            max_attempts,
            error,
            remaining
        );
        attempt += 1;
    }
}
