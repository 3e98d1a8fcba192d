//! Bounded exponential-backoff retry for transient service errors.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoff;
use tracing::warn;

/// Retry policy. Attempts are bounded by count, not elapsed time, so a
/// failed search costs a predictable number of requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    fn to_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        }
    }
}

/// Runs `operation`, retrying while `is_transient` approves the error and
/// the attempt budget lasts. The final error is returned unchanged.
pub async fn retry_async<T, E, Fut, Op>(
    config: &RetryConfig,
    mut operation: Op,
    is_transient: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    E: Display,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = AtomicU32::new(0);
    let max_attempts = config.max_attempts.max(1);
    let is_transient = &is_transient;

    backoff::future::retry(config.to_backoff(), || {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let fut = operation();
        async move {
            match fut.await {
                Ok(value) => Ok(value),
                Err(err) if attempt < max_attempts && is_transient(&err) => {
                    warn!(attempt, "transient error, retrying: {err}");
                    Err(backoff::Error::transient(err))
                }
                Err(err) => Err(backoff::Error::permanent(err)),
            }
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_async(
            &RetryConfig::default(),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("boom".to_string())
                    } else {
                        Ok(n)
                    }
                }
            },
            |_| true,
        )
        .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_async(
            &RetryConfig::default(),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("denied".to_string()) }
            },
            |_| false,
        )
        .await;
        assert_eq!(result, Err("denied".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_attempt_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_async(
            &RetryConfig::default(),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("boom".to_string()) }
            },
            |_| true,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
